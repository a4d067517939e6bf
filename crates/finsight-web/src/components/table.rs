use leptos::prelude::*;

use finsight_statements::TableLayout;
use finsight_statements::equity::{EQUITY_COLUMNS, EquityMatrix, column_title};

use crate::classes;

#[component]
pub fn StatementTable(table: TableLayout) -> impl IntoView {
    let selected_year = table.selected_year;

    let headings = table
        .years
        .iter()
        .map(|&year| view! { <th class=classes::year_heading(year, selected_year)>{year}</th> })
        .collect_view();

    let rows = table
        .rows
        .into_iter()
        .map(|row| {
            let row_class = classes::row(&row);
            let label_class = classes::label_cell(row.kind);
            let padding = format!("padding-left: {}px", row.label_padding_px());
            let kind = row.kind;

            let cells = row
                .cells
                .into_iter()
                .map(|cell| {
                    let class = classes::value_cell(kind, &cell);
                    view! { <td class=class>{cell.text}</td> }
                })
                .collect_view();

            view! {
                <tr class=row_class>
                    <td class=label_class style=padding>{row.label}</td>
                    {cells}
                </tr>
            }
        })
        .collect_view();

    view! {
        <div class="overflow-x-auto">
            <table class="min-w-full border-collapse">
                <thead class="bg-gray-50 border-b-2 border-gray-300">
                    <tr>
                        <th class="px-4 py-3 text-left text-xs font-semibold text-gray-700 uppercase tracking-wider sticky left-0 bg-gray-50 z-10">
                            "Item"
                        </th>
                        {headings}
                    </tr>
                </thead>
                <tbody class="bg-white">{rows}</tbody>
            </table>
        </div>
    }
}

#[component]
pub fn EquityTable(matrix: EquityMatrix) -> impl IntoView {
    let selected_year = matrix.selected_year;
    let span = EQUITY_COLUMNS.len().to_string();

    let year_headings = matrix
        .years
        .iter()
        .map(|&year| {
            view! {
                <th colspan=span.clone() class="px-4 py-2 text-center text-xs font-semibold text-gray-900 border-l border-gray-200">
                    {year}
                </th>
            }
        })
        .collect_view();

    let column_headings = matrix
        .years
        .iter()
        .flat_map(|&year| {
            EQUITY_COLUMNS.iter().map(move |&column| {
                let class = if year == selected_year && column.is_none() {
                    "px-4 py-2 text-right text-xs font-medium text-gray-700 bg-purple-100"
                } else {
                    "px-4 py-2 text-right text-xs font-medium text-gray-700"
                };
                view! { <th class=class>{column_title(column)}</th> }
            })
        })
        .collect_view();

    let rows = matrix
        .rows
        .into_iter()
        .map(|row| {
            let (row_class, label_class) = if row.is_header {
                (
                    "bg-blue-50/30 border-t border-blue-200",
                    "px-4 py-3 text-xs sticky left-0 z-10 bg-blue-50/30 font-semibold text-blue-900 uppercase tracking-wide",
                )
            } else {
                (
                    "hover:bg-gray-50",
                    "px-4 py-3 text-sm sticky left-0 z-10 bg-white text-gray-900",
                )
            };

            let cells = row
                .cells
                .iter()
                .map(|cell| view! { <td class=classes::equity_cell(cell)>{cell.text.clone()}</td> })
                .collect_view();

            view! {
                <tr class=row_class>
                    <td class=label_class>{row.label}</td>
                    {cells}
                </tr>
            }
        })
        .collect_view();

    view! {
        <div class="overflow-x-auto">
            <table class="min-w-full border-collapse">
                <thead class="bg-gray-50 border-b-2 border-gray-300">
                    <tr>
                        <th rowspan="2" class="px-4 py-3 text-left text-xs font-semibold text-gray-700 uppercase tracking-wider sticky left-0 bg-gray-50 z-10">
                            "Item"
                        </th>
                        {year_headings}
                    </tr>
                    <tr>{column_headings}</tr>
                </thead>
                <tbody class="bg-white">{rows}</tbody>
            </table>
        </div>
    }
}
