//! Calculator contract and the calculator modules compiled into the binary.
//!
//! - `contract`: configuration, input and result shapes shared by every
//!   calculator, and the compute function signature
//! - `exports`: how a module presents its exported values to the locator
//! - `modules`: the id -> module registration table

mod contract;
mod exports;
pub mod modules;

mod bmi;
mod compound_interest;
mod percentage;
mod tip;

pub use contract::{
    fill_template, CalculatorConfig, ComputeFn, ComputeInput, ComputeResult, FieldValue,
    InputField, InputKind, Preset, ResultField, SeoBundle, TextBundle,
};
pub use exports::{ExportValue, ModuleExports};
