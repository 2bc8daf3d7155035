//! Operator-maintained configuration: category groups, payment methods and types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the three configured category partitions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CategoryGroup {
    Needs,
    Wants,
    Investments,
}

impl CategoryGroup {
    /// Groups in workbook column order.
    pub const ALL: [CategoryGroup; 3] = [
        CategoryGroup::Needs,
        CategoryGroup::Wants,
        CategoryGroup::Investments,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CategoryGroup::Needs => "Needs",
            CategoryGroup::Wants => "Wants",
            CategoryGroup::Investments => "Investments",
        }
    }
}

impl fmt::Display for CategoryGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Category names per group, each list in configured order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryGroups {
    pub needs: Vec<String>,
    pub wants: Vec<String>,
    pub investments: Vec<String>,
}

impl CategoryGroups {
    pub fn group(&self, group: CategoryGroup) -> &[String] {
        match group {
            CategoryGroup::Needs => &self.needs,
            CategoryGroup::Wants => &self.wants,
            CategoryGroup::Investments => &self.investments,
        }
    }

    pub fn len(&self) -> usize {
        self.needs.len() + self.wants.len() + self.investments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Valid values for the categorical transaction fields.
///
/// `all_categories` is derived from `category_groups` on construction: Needs, then
/// Wants, then Investments, with duplicates across groups kept as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Configuration {
    pub category_groups: CategoryGroups,
    pub all_categories: Vec<String>,
    pub payment_methods: Vec<String>,
    pub transaction_types: Vec<String>,
}

impl Configuration {
    pub fn new(
        category_groups: CategoryGroups,
        payment_methods: Vec<String>,
        transaction_types: Vec<String>,
    ) -> Self {
        let all_categories = CategoryGroup::ALL
            .iter()
            .flat_map(|group| category_groups.group(*group).iter().cloned())
            .collect();
        Self {
            category_groups,
            all_categories,
            payment_methods,
            transaction_types,
        }
    }

    pub fn has_category(&self, name: &str) -> bool {
        self.all_categories.iter().any(|c| c == name)
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.payment_methods.iter().any(|m| m == name)
    }

    pub fn has_type(&self, name: &str) -> bool {
        self.transaction_types.iter().any(|t| t == name)
    }

    /// First group listing `category`, searched in column order.
    pub fn group_of(&self, category: &str) -> Option<CategoryGroup> {
        CategoryGroup::ALL.into_iter().find(|group| {
            self.category_groups
                .group(*group)
                .iter()
                .any(|name| name == category)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn sample() -> Configuration {
        Configuration::new(
            CategoryGroups {
                needs: names(&["Rent", "Groceries"]),
                wants: names(&["Dining"]),
                investments: names(&["Stocks", "Groceries", "Bonds"]),
            },
            names(&["Card", "Cash"]),
            names(&["Income", "Expense"]),
        )
    }

    #[test]
    fn all_categories_concatenates_groups_in_order() {
        let config = sample();
        assert_eq!(config.all_categories.len(), config.category_groups.len());
        assert_eq!(
            config.all_categories,
            names(&["Rent", "Groceries", "Dining", "Stocks", "Groceries", "Bonds"])
        );
    }

    #[test]
    fn group_lookup_prefers_first_column() {
        let config = sample();
        assert_eq!(config.group_of("Groceries"), Some(CategoryGroup::Needs));
        assert_eq!(config.group_of("Bonds"), Some(CategoryGroup::Investments));
        assert_eq!(config.group_of("Travel"), None);
    }

    #[test]
    fn membership_checks_are_exact() {
        let config = sample();
        assert!(config.has_method("Card"));
        assert!(!config.has_method("card"));
        assert!(config.has_type("Expense"));
        assert!(!config.has_category(""));
    }
}
