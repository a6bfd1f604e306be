pub mod parsed_resume;
