//! Sort allow-lists for the order listing.
//!
//! `ORDER BY` fragments can't be bound as statement parameters, so the
//! column and direction are restricted to these enums. The repository only
//! ever interpolates `as_sql()` output, never caller strings.

use serde::{Deserialize, Serialize};

/// Columns the order listing may sort by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderSortColumn {
    #[default]
    Id,
    CustomerId,
    EmployeeId,
    ShipName,
    ShipCity,
    ShipCountry,
    ShippedDate,
    RequiredDate,
    Freight,
}

impl OrderSortColumn {
    /// The qualified column reference interpolated into the listing query.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Id => "o.id",
            Self::CustomerId => "o.customer_id",
            Self::EmployeeId => "o.employee_id",
            Self::ShipName => "o.ship_name",
            Self::ShipCity => "o.ship_city",
            Self::ShipCountry => "o.ship_country",
            Self::ShippedDate => "o.shipped_date",
            Self::RequiredDate => "o.required_date",
            Self::Freight => "o.freight",
        }
    }

    /// Look up a column by its snake_case key. Unknown keys get `None`,
    /// never a passthrough into SQL.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "id" => Some(Self::Id),
            "customer_id" => Some(Self::CustomerId),
            "employee_id" => Some(Self::EmployeeId),
            "ship_name" => Some(Self::ShipName),
            "ship_city" => Some(Self::ShipCity),
            "ship_country" => Some(Self::ShipCountry),
            "shipped_date" => Some(Self::ShippedDate),
            "required_date" => Some(Self::RequiredDate),
            "freight" => Some(Self::Freight),
            _ => None,
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        assert_eq!(OrderSortColumn::default(), OrderSortColumn::Id);
        assert_eq!(SortDirection::default(), SortDirection::Asc);
    }

    #[test]
    fn key_round_trip() {
        for key in [
            "id",
            "customer_id",
            "employee_id",
            "ship_name",
            "ship_city",
            "ship_country",
            "shipped_date",
            "required_date",
            "freight",
        ] {
            let col = OrderSortColumn::from_key(key).expect(key);
            assert!(col.as_sql().ends_with(key));
        }
    }

    #[test]
    fn rejects_unknown_keys() {
        assert_eq!(OrderSortColumn::from_key("id; DROP TABLE orders"), None);
        assert_eq!(OrderSortColumn::from_key(""), None);
        assert_eq!(SortDirection::from_key("asc; --"), None);
    }

    #[test]
    fn sql_fragments_are_fixed() {
        assert_eq!(OrderSortColumn::ShippedDate.as_sql(), "o.shipped_date");
        assert_eq!(SortDirection::Desc.as_sql(), "DESC");
    }
}
