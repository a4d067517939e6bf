mod panel;
mod statements;
mod table;

pub use panel::ReportView;
pub use statements::FinancialStatements;
pub use table::{EquityTable, StatementTable};
