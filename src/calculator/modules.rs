//! Compile-time registration table of calculator modules.
//!
//! Adding a calculator means adding its module and one line here. A registry
//! entry without a line here is served as "coming soon".

use crate::calculator::{bmi, compound_interest, percentage, tip, ModuleExports};
use crate::locator::LoadError;

/// One registered module: an id and the function producing its exports.
#[derive(Debug, Clone, Copy)]
pub struct ModuleRegistration {
    pub id: &'static str,
    pub exports: fn() -> Result<ModuleExports, LoadError>,
}

/// Every calculator module compiled into this binary.
pub static MODULES: &[ModuleRegistration] = &[
    ModuleRegistration {
        id: "bmi",
        exports: bmi::exports,
    },
    ModuleRegistration {
        id: "percentage",
        exports: percentage::exports,
    },
    ModuleRegistration {
        id: "compound_interest",
        exports: compound_interest::exports,
    },
    ModuleRegistration {
        id: "tip",
        exports: tip::exports,
    },
];

/// Find a module registration by calculator id.
pub fn find(id: &str) -> Option<&'static ModuleRegistration> {
    MODULES.iter().find(|m| m.id == id)
}
