use serde::Deserialize;

use crate::domain::types::EntityStatus;
use crate::forms::FormError;

/// Body of a status toggle request.
#[derive(Debug, Deserialize)]
pub struct StatusForm {
    pub status: String,
}

impl TryFrom<StatusForm> for EntityStatus {
    type Error = FormError;

    fn try_from(form: StatusForm) -> Result<Self, Self::Error> {
        form.status.parse().map_err(|_| FormError::InvalidStatus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_statuses_only() {
        let form = StatusForm {
            status: " inactive ".into(),
        };
        assert_eq!(EntityStatus::try_from(form).unwrap(), EntityStatus::Inactive);

        let form = StatusForm {
            status: "deleted".into(),
        };
        assert!(matches!(
            EntityStatus::try_from(form),
            Err(FormError::InvalidStatus)
        ));
    }
}
