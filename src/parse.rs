//! Parsers for the mini-languages embedded in recipe fields
//!
//! `mIngredients` / `mProduct` look like
//! `((ItemClass="/Script/Engine.BlueprintGeneratedClass'/Game/.../Desc_IronIngot.Desc_IronIngot_C'",Amount=3))`
//! and `mProducedIn` is a comma separated list of producer class paths.

use std::sync::LazyLock;

use regex::Regex;

use crate::tables::Tables;

/// `Desc_<id>.Desc_<id>_C` followed by any quote noise and `,Amount=<n>`.
static INGREDIENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"Desc_(\w+)\.Desc_\w+_C['"]*\s*,\s*Amount=(\d+)"#).expect("valid ingredient regex")
});

#[derive(Debug, Clone, PartialEq)]
pub struct ItemAmount<'a> {
    pub item_id: &'a str,
    pub amount: f64,
}

/// Lazy scan over an ingredient list. Cloning the iterator restarts
/// from the clone's position; `ingredients()` always starts from the top.
#[derive(Debug, Clone)]
pub struct Ingredients<'a> {
    text: &'a str,
    pos: usize,
}

pub fn ingredients(text: &str) -> Ingredients<'_> {
    Ingredients { text, pos: 0 }
}

impl<'a> Iterator for Ingredients<'a> {
    type Item = ItemAmount<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let caps = INGREDIENT_RE.captures_at(self.text, self.pos)?;
            let whole = caps.get(0)?;
            self.pos = whole.end();

            let (Some(id), Some(amount)) = (caps.get(1), caps.get(2)) else {
                continue;
            };
            // Only digits reach here, so this cannot fail short of overflow to inf.
            let Ok(amount) = amount.as_str().parse::<f64>() else {
                continue;
            };
            return Some(ItemAmount {
                item_id: id.as_str(),
                amount,
            });
        }
    }
}

/// First recognised machine class in a producer list, e.g.
/// `Build_SmelterMk1_C`. Hand-crafting producers are ignored and `None`
/// means the recipe is not made in any known machine.
pub fn producer_machine<'a>(produced_in: &'a str, tables: &Tables) -> Option<&'a str> {
    produced_in.split(',').find_map(|part| {
        let part = part
            .trim()
            .trim_matches('(')
            .trim_matches(')')
            .trim_matches('"');

        if part.is_empty()
            || tables
                .manual_producers
                .iter()
                .any(|marker| part.contains(marker))
        {
            return None;
        }

        let class_name = part
            .rsplit('.')
            .next()
            .unwrap_or(part)
            .trim_end_matches('\'')
            .trim_end_matches('"');

        tables.is_machine(class_name).then_some(class_name)
    })
}
