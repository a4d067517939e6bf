use leptos::prelude::*;

use finsight_statements::{Report, ReportSection, SectionBody, StatementPanel, StatementSide, ViewState};

use super::{EquityTable, StatementTable};

fn body_view(body: SectionBody) -> AnyView {
    match body {
        SectionBody::Empty { message } => view! { <p class="text-sm text-gray-500 italic py-4">{message}</p> }.into_any(),
        SectionBody::Table(table) => view! { <StatementTable table=table /> }.into_any(),
        SectionBody::BalanceSheet {
            assets,
            liabilities_equity,
        } => view! {
            <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
                <div>
                    <h4 class="text-lg font-semibold text-gray-900 mb-3">{StatementSide::Assets.title()}</h4>
                    <StatementTable table=assets />
                </div>
                <div>
                    <h4 class="text-lg font-semibold text-gray-900 mb-3">{StatementSide::LiabilitiesEquity.title()}</h4>
                    <StatementTable table=liabilities_equity />
                </div>
            </div>
        }
        .into_any(),
        SectionBody::Equity(matrix) => view! { <EquityTable matrix=matrix /> }.into_any(),
    }
}

/// One statement with its own Expand/Collapse toggle
#[component]
pub fn Panel(panel: StatementPanel, view_state: RwSignal<ViewState>, with_captions: bool) -> impl IntoView {
    let StatementPanel {
        kind,
        title,
        scale_caption,
        fiscal_year_end,
        expanded,
        body,
        ..
    } = panel;

    let toggle = move |_| {
        view_state.update(|state| {
            state.toggle(kind);
        });
    };
    let toggle_label = if expanded { "\u{25BC} Collapse" } else { "\u{25B6} Expand" };

    let captions = with_captions.then(|| {
        view! {
            {fiscal_year_end.map(|date| view! { <p class="text-xs text-gray-500 mt-1">{date}</p> })}
            <p class="text-sm text-gray-600 mt-1">{scale_caption}</p>
        }
    });

    let container = if with_captions {
        "bg-white rounded-lg shadow-md p-6"
    } else {
        "border border-gray-200 rounded-lg p-4"
    };

    view! {
        <div class=container>
            <div class="flex items-start justify-between mb-4">
                <div>
                    <h3 class="text-xl font-semibold text-gray-900">{title}</h3>
                    {captions}
                </div>
                <button
                    class="text-sm text-blue-600 hover:text-blue-800 font-medium whitespace-nowrap"
                    on:click=toggle
                >
                    {toggle_label}
                </button>
            </div>
            {expanded.then(|| body_view(body))}
        </div>
    }
}

#[component]
pub fn ReportView(report: Report, view_state: RwSignal<ViewState>) -> impl IntoView {
    let sections = report
        .sections
        .into_iter()
        .map(|section| match section {
            ReportSection::Single(panel) => view! { <Panel panel=panel view_state=view_state with_captions=true /> }.into_any(),
            ReportSection::SideBySide {
                title,
                fiscal_year_end,
                scale_caption,
                left,
                right,
            } => view! {
                <div class="bg-white rounded-lg shadow-md p-6">
                    <h2 class="text-2xl font-bold text-gray-900">{title}</h2>
                    {fiscal_year_end.map(|date| view! { <p class="text-xs text-gray-500 mt-1">{date}</p> })}
                    <p class="text-sm text-gray-600 mt-1">{scale_caption}</p>
                    <div class="grid grid-cols-1 lg:grid-cols-2 gap-6 mt-4">
                        <Panel panel=left view_state=view_state with_captions=false />
                        {right.map(|panel| view! { <Panel panel=panel view_state=view_state with_captions=false /> })}
                    </div>
                </div>
            }
            .into_any(),
        })
        .collect_view();

    view! {
        <div class="bg-blue-50 border-l-4 border-blue-400 p-4 rounded-lg">
            <p class="text-sm text-blue-700">
                <strong>{report.heading}</strong>
            </p>
            <p class="text-xs text-blue-600 mt-1">{report.summary}</p>
        </div>
        <div class="space-y-6">{sections}</div>
    }
}
