//! # Product Model & Configuration
//!
//! Catalog-facing product types and the configuration engine that turns a
//! product definition plus user selections into a priced, display-ready
//! snapshot.
//!
//! ## Pricing Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  The base price already includes every default option.                  │
//! │                                                                         │
//! │              selected          not selected                             │
//! │            ┌───────────────┬──────────────────┐                         │
//! │   default  │  no change    │  price -= delta  │                         │
//! │            ├───────────────┼──────────────────┤                         │
//! │  non-dflt  │ price += delta│  no change       │                         │
//! │            └───────────────┴──────────────────┘                         │
//! │                                                                         │
//! │  The result is a UNIT price. Quantity multiplication happens at         │
//! │  display time and in the cart line, never inside this table.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Category and option iteration order never affects the result; every
//! option contributes independently.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::counter::BoundedCounter;
use crate::money::Money;

// =============================================================================
// Catalog Types
// =============================================================================

/// A configurable product as supplied by the catalog source.
///
/// Immutable once loaded: the configuration engine clones what it needs
/// and cart lines snapshot at add time, so later catalog edits never
/// retroactively change in-flight orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductDefinition {
    /// Unique identifier, opaque to this crate.
    pub id: String,

    /// Display name shown in the menu and on order lines.
    pub name: String,

    /// Price in cents with all default options applied.
    pub base_price_cents: i64,

    /// Option categories keyed by category id.
    #[serde(default)]
    pub params: BTreeMap<String, ParamCategory>,
}

impl ProductDefinition {
    /// Returns the base price as a Money type.
    #[inline]
    pub fn base_price(&self) -> Money {
        Money::from_cents(self.base_price_cents)
    }
}

/// A named group of options within a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ParamCategory {
    /// Display label for the category.
    pub label: String,

    /// Options keyed by option id.
    #[serde(default)]
    pub options: BTreeMap<String, ParamOption>,
}

/// A selectable modifier within a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ParamOption {
    /// Display label for the option.
    pub label: String,

    /// Price adjustment in cents, applied when the selection state
    /// differs from `default`.
    pub price_delta_cents: i64,

    /// Whether this option is pre-selected and already priced into the
    /// product's base price. Absent on the wire means false.
    #[serde(default, rename = "default")]
    pub is_default: bool,
}

impl ParamOption {
    /// Returns the price delta as a Money type.
    #[inline]
    pub fn price_delta(&self) -> Money {
        Money::from_cents(self.price_delta_cents)
    }
}

// =============================================================================
// Selection Types
// =============================================================================

/// What the user has selected: category id to the set of chosen option
/// ids. A category may hold zero, one, or several ids; single-select
/// enforcement (radio groups, dropdowns) belongs to the form collaborator.
pub type SelectionSet = BTreeMap<String, BTreeSet<String>>;

/// Display-ready record of what was chosen in one category.
///
/// Every category of the product appears in a summary, selected or not,
/// so the cart rendering always shows the full shape of the line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CategorySummary {
    /// Category display label.
    pub label: String,

    /// Selected options, option id to option label. Empty when nothing
    /// in the category is selected.
    pub options: BTreeMap<String, String>,
}

/// The frozen value handed to the cart when the user adds a configured
/// product. Captured once; later edits to the selection, the counter, or
/// the catalog do not reach it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationSnapshot {
    /// Product id at add time.
    pub product_id: String,

    /// Product name at add time.
    pub name: String,

    /// Per-unit price in cents, before quantity multiplication.
    pub unit_price_cents: i64,

    /// Chosen quantity at add time.
    pub quantity: i64,

    /// Selection summary per category.
    pub params: BTreeMap<String, CategorySummary>,
}

impl ConfigurationSnapshot {
    /// Returns the per-unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }
}

// =============================================================================
// Product Configuration
// =============================================================================

/// A product being configured: the definition, the current selections,
/// and the amount picker.
///
/// Prices are computed on demand rather than cached, so there is no
/// stale-price state to invalidate when a selection or the amount
/// changes.
#[derive(Debug)]
pub struct ProductConfiguration {
    definition: ProductDefinition,
    selection: SelectionSet,
    amount: BoundedCounter,
}

impl ProductConfiguration {
    /// Starts configuring `definition` with the given amount counter.
    ///
    /// The selection starts with every default option selected, mirroring
    /// the order form, which renders defaults pre-checked. A fresh
    /// configuration therefore prices at exactly the base price; the user
    /// pays less only by deselecting a default.
    pub fn new(definition: ProductDefinition, amount: BoundedCounter) -> Self {
        let selection = definition
            .params
            .iter()
            .map(|(category_id, category)| {
                let defaults: BTreeSet<String> = category
                    .options
                    .iter()
                    .filter(|(_, option)| option.is_default)
                    .map(|(option_id, _)| option_id.clone())
                    .collect();
                (category_id.clone(), defaults)
            })
            .filter(|(_, defaults)| !defaults.is_empty())
            .collect();

        ProductConfiguration {
            definition,
            selection,
            amount,
        }
    }

    /// The definition being configured.
    #[inline]
    pub fn definition(&self) -> &ProductDefinition {
        &self.definition
    }

    /// Current selection state.
    #[inline]
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// The amount picker. Mutations go through the counter interface and
    /// reprice implicitly because prices are computed on read.
    #[inline]
    pub fn amount(&self) -> &BoundedCounter {
        &self.amount
    }

    /// Mutable access to the amount picker for the quantity-input
    /// collaborator.
    #[inline]
    pub fn amount_mut(&mut self) -> &mut BoundedCounter {
        &mut self.amount
    }

    /// Marks an option as selected.
    ///
    /// Ids unknown to the definition are accepted and simply never
    /// contribute to price or summary; selections originate from
    /// user-editable form state and must not be able to crash the widget.
    pub fn select(&mut self, category_id: &str, option_id: &str) {
        self.selection
            .entry(category_id.to_string())
            .or_default()
            .insert(option_id.to_string());
    }

    /// Removes an option from the selection. Unknown ids are a no-op.
    pub fn deselect(&mut self, category_id: &str, option_id: &str) {
        if let Some(options) = self.selection.get_mut(category_id) {
            options.remove(option_id);
            if options.is_empty() {
                self.selection.remove(category_id);
            }
        }
    }

    /// Replaces the whole selection, e.g. after re-reading the form.
    pub fn set_selection(&mut self, selection: SelectionSet) {
        self.selection = selection;
    }

    fn is_selected(&self, category_id: &str, option_id: &str) -> bool {
        self.selection
            .get(category_id)
            .is_some_and(|options| options.contains(option_id))
    }

    /// Computes the per-unit price for the current selection.
    ///
    /// Starts from the base price, then walks every option of every
    /// category: a selected non-default adds its delta, a deselected
    /// default subtracts its delta, the other two states are already
    /// priced in or out. The result may be negative if the catalog data
    /// drives it there; it is surfaced as-is.
    pub fn unit_price(&self) -> Money {
        let mut price = self.definition.base_price();

        for (category_id, category) in &self.definition.params {
            for (option_id, option) in &category.options {
                let selected = self.is_selected(category_id, option_id);
                if selected && !option.is_default {
                    price += option.price_delta();
                } else if !selected && option.is_default {
                    price -= option.price_delta();
                }
            }
        }

        price
    }

    /// The total shown next to the add-to-cart button: unit price times
    /// the chosen amount.
    pub fn display_total(&self) -> Money {
        self.unit_price() * self.amount.value()
    }

    /// Builds the display-ready summary of the current selection.
    ///
    /// Walks the definition, not the selection, so unknown selected ids
    /// drop out and every category appears even when empty.
    pub fn selection_summary(&self) -> BTreeMap<String, CategorySummary> {
        let mut summary = BTreeMap::new();

        for (category_id, category) in &self.definition.params {
            let mut options = BTreeMap::new();
            for (option_id, option) in &category.options {
                if self.is_selected(category_id, option_id) {
                    options.insert(option_id.clone(), option.label.clone());
                }
            }
            summary.insert(
                category_id.clone(),
                CategorySummary {
                    label: category.label.clone(),
                    options,
                },
            );
        }

        summary
    }

    /// Freezes the current state into the value the cart consumes.
    ///
    /// The snapshot carries the pre-multiplication unit price; the cart
    /// line recomputes its own total from unit price and its own counter.
    pub fn snapshot(&self) -> ConfigurationSnapshot {
        ConfigurationSnapshot {
            product_id: self.definition.id.clone(),
            name: self.definition.name.clone(),
            unit_price_cents: self.unit_price().cents(),
            quantity: self.amount.value(),
            params: self.selection_summary(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
