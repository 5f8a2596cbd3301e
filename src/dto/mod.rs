//! DTO modules that bridge services with templates and APIs.

use serde::{Deserialize, Serialize};

use crate::controller::state::FetchParams;
use crate::domain::types::EntityStatus;
use crate::forms::{FormError, non_blank};
use crate::pagination::{PageSize, normalize_page};

pub mod shop;
pub mod table;

/// Query parameters of every list page and list endpoint.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQueryParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_no: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Users are filtered by account status; the alias keeps their URLs
    /// readable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_status: Option<String>,
}

impl ListQueryParams {
    /// Normalizes the raw parameters. Unknown page sizes fall back to the
    /// default and a blank or `ALL` status means no filter.
    pub fn to_fetch_params(&self) -> Result<FetchParams, FormError> {
        let status = non_blank(self.status.clone().or_else(|| self.account_status.clone()))
            .filter(|raw| !raw.eq_ignore_ascii_case("all"))
            .map(|raw| raw.parse::<EntityStatus>())
            .transpose()
            .map_err(|_| FormError::InvalidStatus)?;

        Ok(FetchParams {
            search: non_blank(self.search.clone()),
            status,
            page_no: normalize_page(self.page_no),
            page_size: PageSize::or_default(self.page_size),
        })
    }

    /// Parameters describing `params`, used to rebuild list URLs.
    pub fn from_fetch_params(params: &FetchParams) -> Self {
        Self {
            search: params.search.clone(),
            page_no: Some(params.page_no),
            page_size: Some(params.page_size.get()),
            status: params.status.map(|s| s.to_string()),
            account_status: None,
        }
    }

    pub fn with_page(&self, page_no: usize) -> Self {
        Self {
            page_no: Some(page_no),
            ..self.clone()
        }
    }

    /// URL-encoded form, without the leading `?`.
    pub fn query_string(&self) -> String {
        serde_html_form::to_string(self).unwrap_or_default()
    }
}

/// Body of the delete form; the row count lets the list step back a page
/// when its last row goes away.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteForm {
    #[serde(default)]
    pub items_on_page: Option<usize>,
}

/// Response of the image upload endpoint.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub image_url: String,
}

/// Error body of the JSON API.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_parameters_are_normalized() {
        let query = ListQueryParams {
            search: Some("  ".to_string()),
            page_no: Some(0),
            page_size: Some(7),
            status: Some("all".to_string()),
            account_status: None,
        };
        let params = query.to_fetch_params().unwrap();

        assert_eq!(params.search, None);
        assert_eq!(params.status, None);
        assert_eq!(params.page_no, 1);
        assert_eq!(params.page_size, PageSize::default());
    }

    #[test]
    fn account_status_is_an_alias_for_status() {
        let query = ListQueryParams {
            account_status: Some("inactive".to_string()),
            ..ListQueryParams::default()
        };
        assert_eq!(
            query.to_fetch_params().unwrap().status,
            Some(EntityStatus::Inactive)
        );

        let bad = ListQueryParams {
            status: Some("archived".to_string()),
            ..ListQueryParams::default()
        };
        assert!(matches!(
            bad.to_fetch_params(),
            Err(FormError::InvalidStatus)
        ));
    }

    #[test]
    fn query_string_skips_missing_values() {
        let query = ListQueryParams {
            search: Some("blue mug".to_string()),
            page_size: Some(20),
            ..ListQueryParams::default()
        }
        .with_page(3);

        assert_eq!(query.query_string(), "search=blue+mug&pageNo=3&pageSize=20");
    }

    #[test]
    fn deserializes_camel_case_query() {
        let query: ListQueryParams =
            serde_html_form::from_str("search=mug&pageNo=2&pageSize=50&status=ACTIVE").unwrap();
        let params = query.to_fetch_params().unwrap();

        assert_eq!(params.page_no, 2);
        assert_eq!(params.page_size.get(), 50);
        assert_eq!(params.status, Some(EntityStatus::Active));
    }
}
