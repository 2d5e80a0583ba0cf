//! Offset/limit translation and the wire list envelope.
//!
//! Every counter crossing the wire boundary goes through [`narrow`], which
//! fails closed instead of truncating or wrapping.

use serde::{Deserialize, Serialize};

use crate::config::AdapterConfig;
use crate::error::ConvertError;

/// Convert between integer widths, failing with a validation error when
/// the value does not fit.
pub fn narrow<S, T>(field: &'static str, value: S) -> Result<T, ConvertError>
where
    S: Copy + Into<i128>,
    T: TryFrom<S>,
{
    T::try_from(value).map_err(|_| ConvertError::Overflow {
        field,
        value: value.into(),
    })
}

/// Backend pagination derived from wire parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub offset: u32,
    pub limit: u32,
}

impl PageRequest {
    pub fn from_wire(
        offset: Option<i32>,
        page_size: Option<i32>,
        config: &AdapterConfig,
    ) -> Result<Self, ConvertError> {
        let offset: u32 = narrow("offset", offset.unwrap_or(0))?;
        let limit = match page_size {
            None => config.default_page_size,
            Some(size) => narrow("pageSize", size)?,
        };
        if limit == 0 || limit > config.max_page_size {
            return Err(ConvertError::InvalidValue {
                field: "pageSize",
                reason: format!("must be between 1 and {}", config.max_page_size),
            });
        }
        Ok(Self { offset, limit })
    }
}

/// Wire list envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEnvelope<T> {
    pub items: Vec<T>,
    pub total_elements: i32,
    pub has_next: bool,
}

impl<T> ListEnvelope<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> ListEnvelope<U> {
        ListEnvelope {
            items: self.items.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            has_next: self.has_next,
        }
    }
}

pub fn assemble<T>(
    items: Vec<T>,
    total: u64,
    has_next: bool,
) -> Result<ListEnvelope<T>, ConvertError> {
    Ok(ListEnvelope {
        items,
        total_elements: narrow("totalElements", total)?,
        has_next,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_absent() {
        let page = PageRequest::from_wire(None, None, &AdapterConfig::default()).unwrap();
        assert_eq!(page, PageRequest { offset: 0, limit: 20 });
    }

    #[test]
    fn negative_and_oversized_requests_fail() {
        let config = AdapterConfig::default();
        assert!(matches!(
            PageRequest::from_wire(Some(-1), None, &config),
            Err(ConvertError::Overflow { field: "offset", value: -1 })
        ));
        assert!(PageRequest::from_wire(None, Some(-4), &config).is_err());
        assert!(PageRequest::from_wire(None, Some(0), &config).is_err());
        assert!(PageRequest::from_wire(None, Some(101), &config).is_err());
        assert!(PageRequest::from_wire(Some(40), Some(100), &config).is_ok());
    }

    #[test]
    fn totals_that_do_not_fit_fail_closed() {
        let err = assemble(Vec::<u8>::new(), u64::from(u32::MAX), false).unwrap_err();
        assert!(matches!(err, ConvertError::Overflow { field: "totalElements", .. }));

        let ok = assemble(vec![1, 2], i32::MAX as u64, true).unwrap();
        assert_eq!(ok.total_elements, i32::MAX);
    }

    #[test]
    fn narrowing_never_wraps() {
        assert!(narrow::<i32, u32>("n", -1).is_err());
        assert!(narrow::<u64, i32>("n", 1 << 31).is_err());
        assert!(narrow::<u64, u32>("n", u64::MAX).is_err());
        assert_eq!(narrow::<i64, u64>("n", 42).unwrap(), 42);
    }
}
