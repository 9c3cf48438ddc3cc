use serde::Serialize;

pub const ACCESS_DENIED_TITLE: &str = "Access Denied";

/// State of the dialog shown when a signed-in user lacks a permission.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AccessDeniedModal {
    pub visible: bool,
    pub required_permission: Option<String>,
}

impl AccessDeniedModal {
    pub fn open(required_permission: impl Into<String>) -> Self {
        Self {
            visible: true,
            required_permission: Some(required_permission.into()),
        }
    }

    pub fn title(&self) -> &'static str {
        ACCESS_DENIED_TITLE
    }

    pub fn message(&self) -> String {
        match &self.required_permission {
            Some(required) => format!(
                "You don't have permission to access this feature. Required: {required}. Contact the store owner to request access."
            ),
            None => "You don't have permission to access this feature. Contact the store owner to request access.".to_owned(),
        }
    }

    pub fn close(&mut self) {
        self.visible = false;
    }
}
