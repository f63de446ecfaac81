//! Optional transformation applied to each decoded page before it is saved.

use crate::error::BoxError;
use crate::page::DecodedPage;

/// Transforms a decoded page before persistence and before `page`/`total`
/// are read from it. Implemented for any matching closure.
pub trait PageFilter {
    fn apply(&self, page: DecodedPage) -> Result<DecodedPage, BoxError>;
}

impl<F> PageFilter for F
where
    F: Fn(DecodedPage) -> Result<DecodedPage, BoxError>,
{
    fn apply(&self, page: DecodedPage) -> Result<DecodedPage, BoxError> {
        self(page)
    }
}
