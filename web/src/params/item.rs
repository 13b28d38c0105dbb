use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::Error;
use domain::PageParams;

pub(crate) const MAX_PAGE_SIZE: u64 = 100;

/// Query parameters for GET /items.
#[derive(Debug, Deserialize, IntoParams)]
pub(crate) struct IndexParams {
    /// Case-insensitive substring filter applied to item titles.
    pub(crate) q: Option<String>,
    /// 1-based page number. Must be supplied together with `page_size`.
    pub(crate) page: Option<u64>,
    /// Number of items per page (1..=100). Must be supplied together with `page`.
    pub(crate) page_size: Option<u64>,
}

impl IndexParams {
    /// Validates the pagination pair. Supplying exactly one of `page` and
    /// `page_size` is a client error, as are out-of-range values.
    pub(crate) fn page_params(&self) -> Result<Option<PageParams>, Error> {
        match (self.page, self.page_size) {
            (None, None) => Ok(None),
            (Some(page), Some(page_size)) => {
                if page < 1 {
                    return Err(Error::BadRequest("page must be >= 1".to_string()));
                }
                if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
                    return Err(Error::BadRequest(format!(
                        "page_size must be between 1 and {MAX_PAGE_SIZE}"
                    )));
                }
                Ok(Some(PageParams { page, page_size }))
            }
            _ => Err(Error::BadRequest(
                "page and page_size must be supplied together".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: Option<u64>, page_size: Option<u64>) -> IndexParams {
        IndexParams {
            q: None,
            page,
            page_size,
        }
    }

    #[test]
    fn no_pagination_params_is_valid() {
        assert_eq!(params(None, None).page_params().unwrap(), None);
    }

    #[test]
    fn complete_pagination_pair_is_valid() {
        assert_eq!(
            params(Some(2), Some(25)).page_params().unwrap(),
            Some(PageParams {
                page: 2,
                page_size: 25
            })
        );
    }

    #[test]
    fn page_without_page_size_is_rejected() {
        assert!(matches!(
            params(Some(1), None).page_params(),
            Err(Error::BadRequest(_))
        ));
    }

    #[test]
    fn page_size_without_page_is_rejected() {
        assert!(matches!(
            params(None, Some(10)).page_params(),
            Err(Error::BadRequest(_))
        ));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert!(matches!(
            params(Some(0), Some(10)).page_params(),
            Err(Error::BadRequest(_))
        ));
        assert!(matches!(
            params(Some(1), Some(0)).page_params(),
            Err(Error::BadRequest(_))
        ));
        assert!(matches!(
            params(Some(1), Some(101)).page_params(),
            Err(Error::BadRequest(_))
        ));
    }

    #[test]
    fn max_page_size_is_accepted() {
        assert_eq!(
            params(Some(1), Some(MAX_PAGE_SIZE)).page_params().unwrap(),
            Some(PageParams {
                page: 1,
                page_size: MAX_PAGE_SIZE
            })
        );
    }
}
