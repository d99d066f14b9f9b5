//! Row query builder for the REST row API.

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Ascending,
    Descending,
}

impl Order {
    fn as_str(&self) -> &'static str {
        match self {
            Order::Ascending => "asc",
            Order::Descending => "desc",
        }
    }
}

/// Filters, ordering and limit for a row request.
///
/// Produces query pairs in the `column=eq.value` form the REST layer
/// understands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowQuery {
    columns: Option<String>,
    filters: Vec<(String, String)>,
    order: Vec<(String, Order)>,
    limit: Option<usize>,
}

impl RowQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the returned columns (default `*`).
    pub fn columns(mut self, columns: impl Into<String>) -> Self {
        self.columns = Some(columns.into());
        self
    }

    /// Require `column = value`.
    pub fn eq(mut self, column: impl Into<String>, value: impl ToString) -> Self {
        self.filters
            .push((column.into(), format!("eq.{}", value.to_string())));
        self
    }

    /// Require `column` to be one of `values`.
    pub fn any_of<I, V>(mut self, column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: ToString,
    {
        let list = values
            .into_iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(",");
        self.filters.push((column.into(), format!("in.({})", list)));
        self
    }

    pub fn order_by(mut self, column: impl Into<String>, order: Order) -> Self {
        self.order.push((column.into(), order));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn has_filters(&self) -> bool {
        !self.filters.is_empty()
    }

    /// Query pairs for a read.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![(
            "select".to_string(),
            self.columns.clone().unwrap_or_else(|| "*".to_string()),
        )];
        pairs.extend(self.filter_pairs());
        if !self.order.is_empty() {
            let order = self
                .order
                .iter()
                .map(|(column, dir)| format!("{}.{}", column, dir.as_str()))
                .collect::<Vec<_>>()
                .join(",");
            pairs.push(("order".to_string(), order));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        pairs
    }

    /// Only the filter pairs, for updates and deletes.
    pub fn filter_pairs(&self) -> Vec<(String, String)> {
        self.filters.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(expected: &[(&str, &str)]) -> Vec<(String, String)> {
        expected
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_default_selects_everything() {
        assert_eq!(RowQuery::new().to_pairs(), pairs(&[("select", "*")]));
    }

    #[test]
    fn test_active_slides_query() {
        let query = RowQuery::new()
            .eq("is_active", true)
            .order_by("created_at", Order::Ascending);

        assert_eq!(
            query.to_pairs(),
            pairs(&[
                ("select", "*"),
                ("is_active", "eq.true"),
                ("order", "created_at.asc")
            ])
        );
    }

    #[test]
    fn test_in_filter_and_limit() {
        let query = RowQuery::new()
            .columns("id,name")
            .any_of("id", [3, 5, 8])
            .limit(1);

        assert_eq!(
            query.to_pairs(),
            pairs(&[("select", "id,name"), ("id", "in.(3,5,8)"), ("limit", "1")])
        );
        assert!(query.has_filters());
        assert_eq!(query.filter_pairs().len(), 1);
    }
}
