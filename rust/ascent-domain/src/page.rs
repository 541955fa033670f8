use serde::{Deserialize, Serialize};

/// One page of a paginated list response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>) -> Self {
        Page {
            data,
            next_cursor: None,
            total_count: None,
        }
    }

    pub fn with_cursor(data: Vec<T>, next_cursor: Option<String>) -> Self {
        Page {
            data,
            next_cursor,
            total_count: None,
        }
    }

    pub fn has_more(&self) -> bool {
        self.next_cursor.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_more_follows_cursor() {
        let page = Page::with_cursor(vec![1, 2], Some("cursor".into()));
        assert!(page.has_more());
        assert!(!Page::new(vec![1]).has_more());
    }
}
