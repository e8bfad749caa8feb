//! Manufacturer-side catalog filtering.
//!
//! Every criterion only rejects orders that explicitly conflict with it: an
//! order that declares no price bound, color or size passes the matching
//! criterion unconditionally.

use crate::error::DomainResult;
use crate::order::{parse_bound, Order};

/// Criteria a manufacturer applies while browsing. Unset fields match all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogCriteria {
    pub search_term: Option<String>,
    pub price_min: Option<u64>,
    pub price_max: Option<u64>,
    pub color: Option<String>,
    pub size: Option<String>,
}

impl CatalogCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build criteria from raw form text. Blank inputs are unset.
    pub fn from_form(
        search_term: &str,
        price_min: &str,
        price_max: &str,
        color: &str,
        size: &str,
    ) -> DomainResult<Self> {
        Ok(Self {
            search_term: non_empty(search_term),
            price_min: parse_bound(price_min, "Minimum price")?,
            price_max: parse_bound(price_max, "Maximum price")?,
            color: non_empty(color),
            size: non_empty(size),
        })
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search_term = non_empty(&term.into());
        self
    }

    pub fn price_min(mut self, min: u64) -> Self {
        self.price_min = Some(min);
        self
    }

    pub fn price_max(mut self, max: u64) -> Self {
        self.price_max = Some(max);
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = non_empty(&color.into());
        self
    }

    pub fn size(mut self, size: impl Into<String>) -> Self {
        self.size = non_empty(&size.into());
        self
    }

    /// Intersection of the independent predicates.
    pub fn matches(&self, order: &Order) -> bool {
        self.matches_search(order)
            && self.matches_price(order)
            && matches_declared(order.filters.color.as_deref(), self.color.as_deref())
            && matches_declared(order.filters.size.as_deref(), self.size.as_deref())
    }

    /// Apply to a sequence, preserving its order.
    pub fn apply<'a, I>(&self, orders: I) -> Vec<Order>
    where
        I: IntoIterator<Item = &'a Order>,
    {
        orders
            .into_iter()
            .filter(|order| self.matches(order))
            .cloned()
            .collect()
    }

    fn matches_search(&self, order: &Order) -> bool {
        let Some(term) = self.search_term.as_deref() else {
            return true;
        };
        let needle = term.to_lowercase();
        order.title.to_lowercase().contains(&needle)
            || order.description.to_lowercase().contains(&needle)
    }

    // A declared bound of zero is treated as undeclared.
    fn matches_price(&self, order: &Order) -> bool {
        let min_ok = match (self.price_min, order.filters.price_min()) {
            (Some(wanted), Some(declared)) if declared != 0 => declared >= wanted,
            _ => true,
        };
        let max_ok = match (self.price_max, order.filters.price_max()) {
            (Some(wanted), Some(declared)) if declared != 0 => declared <= wanted,
            _ => true,
        };
        min_ok && max_ok
    }
}

fn matches_declared(declared: Option<&str>, wanted: Option<&str>) -> bool {
    match (declared, wanted) {
        (Some(declared), Some(wanted)) => declared == wanted,
        _ => true,
    }
}

/// Trimmed the same way as the filters stored on an order.
fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::{NewOrder, OrderFilters};

    fn order(title: &str, description: &str, filters: OrderFilters) -> Order {
        Order::create(NewOrder::new("buyer", title, description, filters)).unwrap()
    }

    fn colored(color: Option<&str>) -> Order {
        order(
            "Jacket",
            "Warm",
            OrderFilters::new(None, None, color.map(String::from), None).unwrap(),
        )
    }

    #[test]
    fn test_empty_criteria_pass_everything() {
        let orders = vec![colored(Some("black")), colored(None)];
        assert_eq!(CatalogCriteria::new().apply(&orders).len(), 2);
    }

    #[test]
    fn test_color_is_permissive_when_unset() {
        let black = colored(Some("black"));
        let plain = colored(None);
        let orders = vec![black.clone(), plain.clone()];

        let red = CatalogCriteria::new().color("red").apply(&orders);
        assert_eq!(red, vec![plain.clone()]);

        let black_only = CatalogCriteria::new().color("black").apply(&orders);
        assert_eq!(black_only, vec![black, plain]);
    }

    #[test]
    fn test_color_never_returns_conflicting_declared_value() {
        let orders: Vec<Order> = ["black", "white", "dark", "any"]
            .iter()
            .map(|c| colored(Some(c)))
            .chain(std::iter::once(colored(None)))
            .collect();

        let result = CatalogCriteria::new().color("black").apply(&orders);
        assert!(result
            .iter()
            .all(|o| o.filters.color.as_deref().map_or(true, |c| c == "black")));
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_size_exact_match() {
        let sized = order(
            "Sneakers",
            "Running",
            OrderFilters::new(None, None, None, Some("42".into())).unwrap(),
        );
        assert!(CatalogCriteria::new().size("42").matches(&sized));
        assert!(!CatalogCriteria::new().size("43").matches(&sized));
    }

    #[test]
    fn test_search_is_case_insensitive_over_title_or_description() {
        let sneakers = order("Nike sneakers", "size 42, black", OrderFilters::default());
        assert!(CatalogCriteria::new().search("NIKE").matches(&sneakers));
        assert!(CatalogCriteria::new().search("Black").matches(&sneakers));
        assert!(!CatalogCriteria::new().search("iphone").matches(&sneakers));
    }

    #[test]
    fn test_price_bounds_compare_declared_bounds() {
        let ranged = order(
            "Phone",
            "Used",
            OrderFilters::new(Some(30000), Some(80000), None, None).unwrap(),
        );
        assert!(CatalogCriteria::new().price_min(30000).matches(&ranged));
        assert!(!CatalogCriteria::new().price_min(30001).matches(&ranged));
        assert!(CatalogCriteria::new().price_max(80000).matches(&ranged));
        assert!(!CatalogCriteria::new().price_max(79999).matches(&ranged));
    }

    #[test]
    fn test_price_passes_when_order_declares_nothing() {
        let open = order("Phone", "Any", OrderFilters::default());
        let criteria = CatalogCriteria::new().price_min(1_000_000).price_max(1);
        assert!(criteria.matches(&open));
    }

    #[test]
    fn test_price_only_checks_the_declared_side() {
        let min_only = order(
            "Phone",
            "Any",
            OrderFilters::new(Some(500), None, None, None).unwrap(),
        );
        assert!(CatalogCriteria::new().price_max(1).matches(&min_only));
        assert!(!CatalogCriteria::new().price_min(501).matches(&min_only));
    }

    #[test]
    fn test_zero_declared_bound_is_ignored() {
        let zero_min = order(
            "Phone",
            "Any",
            OrderFilters::new(Some(0), Some(100), None, None).unwrap(),
        );
        assert!(CatalogCriteria::new().price_min(50).matches(&zero_min));
    }

    #[test]
    fn test_predicates_intersect() {
        let sneakers = order(
            "Nike sneakers",
            "size 42, black",
            OrderFilters::new(Some(5000), Some(15000), Some("black".into()), Some("42".into()))
                .unwrap(),
        );
        let all_match = CatalogCriteria::new()
            .search("nike")
            .price_min(5000)
            .color("black")
            .size("42");
        assert!(all_match.matches(&sneakers));
        assert!(!all_match.clone().size("41").matches(&sneakers));
    }

    #[test]
    fn test_from_form_treats_empty_as_unset() {
        let criteria = CatalogCriteria::from_form("", "", "", "", "").unwrap();
        assert_eq!(criteria, CatalogCriteria::default());

        let parsed = CatalogCriteria::from_form("nike", "10", "20", "red", "L").unwrap();
        assert_eq!(parsed.price_min, Some(10));
        assert_eq!(parsed.color.as_deref(), Some("red"));
        assert!(CatalogCriteria::from_form("", "ten", "", "", "").is_err());
    }

    #[test]
    fn test_criteria_text_is_trimmed_like_order_filters() {
        let black = order(
            "Sneakers",
            "Running",
            OrderFilters::new(None, None, Some(" black ".into()), Some("42 ".into())).unwrap(),
        );

        let criteria = CatalogCriteria::from_form("  ", "", "", " black", " 42").unwrap();
        assert_eq!(criteria.search_term, None);
        assert_eq!(criteria.color.as_deref(), Some("black"));
        assert!(criteria.matches(&black));
        assert!(CatalogCriteria::new().color("black ").size("  ").matches(&black));
        assert!(!CatalogCriteria::new().color(" red ").matches(&black));
    }
}
