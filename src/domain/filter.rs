//! Facet selections applied on top of the free-text query.
//!
//! [`FilterState`] is a plain value object: the filter editor writes it, badge
//! removal clears single facets of it, and the query builder reads it. Each
//! facet is independently optional.
//!
//! The rate facet distinguishes "never visited" (`None`, no badge) from an
//! explicit "any rate" choice (`Some(RateChoice::Any)`, rendered as
//! `Rate: any`). Both build the same query.

use serde::{Deserialize, Serialize};

/// A city/country pair offered by the location facet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub country: String,
}

impl Location {
    #[must_use]
    pub fn new(city: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            country: country.into(),
        }
    }

    /// Display label, e.g. `"Auckland, New Zealand"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}, {}", self.city, self.country)
    }
}

/// A skill category offered by the category facet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

impl Category {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Rate facet choice.
///
/// `Any` is a value the user picked, not an absence of choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RateChoice {
    Any,
    FixedCost,
    Hourly,
}

impl RateChoice {
    /// Backend constraint string; `Any` imposes none.
    #[must_use]
    pub const fn wire_value(self) -> &'static str {
        match self {
            Self::Any => "",
            Self::FixedCost => "fixed_cost",
            Self::Hourly => "hourly",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::FixedCost => "fixed cost",
            Self::Hourly => "hourly",
        }
    }
}

/// Delivery facet choice, mapped onto the two delivery flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeliveryChoice {
    Any,
    Online,
    InPerson,
}

impl DeliveryChoice {
    /// Returns `(delivery_online, delivery_in_person)`.
    #[must_use]
    pub const fn flags(self) -> (bool, bool) {
        match self {
            Self::Any => (false, false),
            Self::Online => (true, false),
            Self::InPerson => (false, true),
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Any => "Any",
            Self::Online => "Online",
            Self::InPerson => "In person",
        }
    }
}

/// One independent filter dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FacetKind {
    Location,
    Category,
    Rate,
    Delivery,
}

impl FacetKind {
    /// All facets in the order the filter editor lists them.
    pub const ALL: [Self; 4] = [Self::Location, Self::Category, Self::Rate, Self::Delivery];

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Location => "Location",
            Self::Category => "Category",
            Self::Rate => "Rate",
            Self::Delivery => "Delivery",
        }
    }

    /// Parses a facet name as typed by a host (case-insensitive).
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "location" => Some(Self::Location),
            "category" => Some(Self::Category),
            "rate" => Some(Self::Rate),
            "delivery" => Some(Self::Delivery),
            _ => None,
        }
    }
}

/// A single selectable option inside a facet editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FacetValue {
    /// `None` is the editor's "Any" row.
    Location(Option<Location>),
    /// `None` is the editor's "Any" row.
    Category(Option<Category>),
    Rate(RateChoice),
    Delivery(DeliveryChoice),
}

impl FacetValue {
    #[must_use]
    pub const fn kind(&self) -> FacetKind {
        match self {
            Self::Location(_) => FacetKind::Location,
            Self::Category(_) => FacetKind::Category,
            Self::Rate(_) => FacetKind::Rate,
            Self::Delivery(_) => FacetKind::Delivery,
        }
    }

    /// Row label shown in the facet editor.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Location(None) | Self::Category(None) => "Any".to_string(),
            Self::Location(Some(location)) => location.label(),
            Self::Category(Some(category)) => category.name.clone(),
            Self::Rate(RateChoice::Any) => "Any".to_string(),
            Self::Rate(rate) => {
                let label = rate.label();
                let mut chars = label.chars();
                chars.next().map_or_else(String::new, |first| {
                    first.to_uppercase().chain(chars).collect()
                })
            }
            Self::Delivery(delivery) => delivery.label().to_string(),
        }
    }
}

/// A removable chip describing one applied facet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub facet: FacetKind,
    pub label: String,
}

/// Current facet selections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub location: Option<Location>,
    pub category: Option<Category>,
    pub rate: Option<RateChoice>,
    pub delivery_online: bool,
    pub delivery_in_person: bool,
}

impl FilterState {
    /// Writes one editor option into the matching facet.
    pub fn apply(&mut self, value: &FacetValue) {
        match value {
            FacetValue::Location(location) => self.location.clone_from(location),
            FacetValue::Category(category) => self.category.clone_from(category),
            FacetValue::Rate(rate) => self.rate = Some(*rate),
            FacetValue::Delivery(delivery) => {
                (self.delivery_online, self.delivery_in_person) = delivery.flags();
            }
        }
    }

    /// Clears exactly one facet, leaving the others untouched.
    pub fn clear(&mut self, facet: FacetKind) {
        match facet {
            FacetKind::Location => self.location = None,
            FacetKind::Category => self.category = None,
            FacetKind::Rate => self.rate = None,
            FacetKind::Delivery => {
                self.delivery_online = false;
                self.delivery_in_person = false;
            }
        }
    }

    /// Clears every facet.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The editor option currently selected for `facet`, if the facet is set.
    ///
    /// Delivery with neither flag set reports `Any`, so the editor always has
    /// a highlighted row for it.
    #[must_use]
    pub fn selected(&self, facet: FacetKind) -> Option<FacetValue> {
        match facet {
            FacetKind::Location => Some(FacetValue::Location(self.location.clone())),
            FacetKind::Category => Some(FacetValue::Category(self.category.clone())),
            FacetKind::Rate => self.rate.map(FacetValue::Rate),
            FacetKind::Delivery => Some(FacetValue::Delivery(
                match (self.delivery_online, self.delivery_in_person) {
                    (true, false) => DeliveryChoice::Online,
                    (false, true) => DeliveryChoice::InPerson,
                    (false, false) => DeliveryChoice::Any,
                    (true, true) => return None,
                },
            )),
        }
    }

    /// Badges for every set facet, in editor order.
    #[must_use]
    pub fn badges(&self) -> Vec<Badge> {
        let mut badges = Vec::new();

        if let Some(location) = &self.location {
            badges.push(Badge {
                facet: FacetKind::Location,
                label: format!("Location: {}", location.label()),
            });
        }
        if let Some(category) = &self.category {
            badges.push(Badge {
                facet: FacetKind::Category,
                label: format!("Category: {}", category.name),
            });
        }
        if let Some(rate) = self.rate {
            badges.push(Badge {
                facet: FacetKind::Rate,
                label: format!("Rate: {}", rate.label()),
            });
        }

        let delivery = match (self.delivery_online, self.delivery_in_person) {
            (true, true) => Some("online, in person"),
            (true, false) => Some("online"),
            (false, true) => Some("in person"),
            (false, false) => None,
        };
        if let Some(delivery) = delivery {
            badges.push(Badge {
                facet: FacetKind::Delivery,
                label: format!("Delivery: {delivery}"),
            });
        }

        badges
    }
}
