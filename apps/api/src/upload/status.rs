use serde::Serialize;

use crate::upload::UploadStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonIcon {
    Upload,
    /// Spinning refresh arrows.
    Refresh,
    Check,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BannerTone {
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Banner {
    pub tone: BannerTone,
    pub title: &'static str,
    pub description: &'static str,
}

/// Everything the upload card needs to render one state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusView {
    pub button_label: &'static str,
    pub button_icon: ButtonIcon,
    pub button_disabled: bool,
    pub show_progress: bool,
    pub banner: Option<Banner>,
    pub parsed_tab_enabled: bool,
}

pub fn project(status: UploadStatus, parsed: bool) -> StatusView {
    match status {
        UploadStatus::Idle => StatusView {
            button_label: "Upload",
            button_icon: ButtonIcon::Upload,
            button_disabled: false,
            show_progress: false,
            banner: None,
            parsed_tab_enabled: false,
        },
        UploadStatus::Uploading => StatusView {
            button_label: "Uploading...",
            button_icon: ButtonIcon::Refresh,
            button_disabled: true,
            show_progress: true,
            banner: None,
            parsed_tab_enabled: false,
        },
        UploadStatus::Success => StatusView {
            button_label: "Uploaded",
            button_icon: ButtonIcon::Check,
            button_disabled: true,
            show_progress: false,
            banner: Some(Banner {
                tone: BannerTone::Default,
                title: "Upload Successful",
                description: if parsed {
                    "Your resume has been uploaded and parsed successfully."
                } else {
                    "Your resume has been uploaded and is being processed..."
                },
            }),
            parsed_tab_enabled: parsed,
        },
        UploadStatus::Error => StatusView {
            button_label: "Upload",
            button_icon: ButtonIcon::Upload,
            button_disabled: false,
            show_progress: false,
            banner: Some(Banner {
                tone: BannerTone::Destructive,
                title: "Upload Failed",
                description: "There was an error uploading your resume. Please try again.",
            }),
            parsed_tab_enabled: false,
        },
    }
}
