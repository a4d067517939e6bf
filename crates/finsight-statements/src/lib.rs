//! Financial statement presentation
//!
//! Turns the flat line items returned by the financial-data service into
//! presentation trees and laid-out tables: grouping, parent linking,
//! ordering, total classification, accounting number formatting, and the
//! balance sheet and equity statement special cases.

pub mod balance;
pub mod classify;
pub mod constants;
pub mod equity;
pub mod error;
pub mod export;
pub mod format;
pub mod html;
pub mod item;
pub mod label;
pub mod layout;
pub mod report;
pub mod statement;
pub mod tree;
pub mod view_state;

pub use classify::{EnglishLabelPolicy, TotalPolicy};
pub use error::{Result, StatementError};
pub use format::{format_cell, format_number};
pub use item::{LineItem, StatementRow, StatementSide};
pub use layout::{LayoutOptions, RowLayout, TableLayout, layout_table};
pub use report::{Report, ReportSection, SectionBody, StatementPanel, build_report};
pub use statement::{AccountingStandard, SectionData, StatementKind, StatementsResponse};
pub use tree::{FlatNode, TreeNode, build_tree, flatten};
pub use view_state::{RequestSequencer, RequestTicket, ViewState};
