use leptos::prelude::*;

use finsight_statements::{EnglishLabelPolicy, RequestSequencer, ViewState, build_report};

use super::ReportView;
use crate::api::get_statements;
use crate::config::CONFIG;

#[component]
fn Loading() -> impl IntoView {
    view! { <div class="text-gray-500 py-8 text-center">"Loading statements..."</div> }
}

/// Company/year picker plus the statements it loads
#[component]
pub fn FinancialStatements() -> impl IntoView {
    let view_state = RwSignal::new(ViewState::new(CONFIG.default_ticker, CONFIG.default_year));
    let sequencer = StoredValue::new(RequestSequencer::new());
    let (ticket, set_ticket) = signal(sequencer.with_value(|seq| seq.begin()));

    // Refetches only when a new request is started; the selection is read untracked
    let statements = LocalResource::new(move || {
        let ticket = ticket.get();
        let (ticker, year) = view_state.with_untracked(|state| (state.ticker.clone(), state.year));
        async move { (ticket, get_statements(&ticker, year).await) }
    });

    let (ticker_input, set_ticker_input) = signal(CONFIG.default_ticker.to_string());
    let (year_input, set_year_input) = signal(CONFIG.default_year);

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let ticker = ticker_input.get_untracked().trim().to_uppercase();
        if ticker.is_empty() {
            return;
        }
        let year = year_input.get_untracked();

        // Resubmitting the same selection retries it
        let started = sequencer.with_value(|seq| view_state.try_update(|state| state.select(ticker, year, seq)));
        if let Some(started) = started {
            set_ticket.set(started);
        }
    };

    let ticker_options = CONFIG
        .tickers
        .iter()
        .map(|ticker| view! { <option value=*ticker /> })
        .collect_view();

    let year_options = CONFIG
        .years
        .iter()
        .map(|&year| {
            view! {
                <option value=year.to_string() selected={year == CONFIG.default_year}>
                    {year}
                </option>
            }
        })
        .collect_view();

    view! {
        <div class="space-y-6">
            <form class="bg-white rounded-lg shadow-md p-6 flex flex-wrap items-end gap-4" on:submit=submit>
                <label class="flex flex-col text-sm font-medium text-gray-700">
                    "Ticker"
                    <input
                        type="text"
                        list="finsight-tickers"
                        class="mt-1 border border-gray-300 rounded-md px-3 py-2 uppercase"
                        prop:value=move || ticker_input.get()
                        on:input=move |ev| set_ticker_input.set(event_target_value(&ev))
                    />
                    <datalist id="finsight-tickers">{ticker_options}</datalist>
                </label>

                <label class="flex flex-col text-sm font-medium text-gray-700">
                    "Fiscal year"
                    <select
                        class="mt-1 border border-gray-300 rounded-md px-3 py-2"
                        on:change=move |ev| {
                            if let Ok(year) = event_target_value(&ev).parse::<i32>() {
                                set_year_input.set(year);
                            }
                        }
                    >
                        {year_options}
                    </select>
                </label>

                <button
                    type="submit"
                    class="bg-blue-600 hover:bg-blue-700 text-white font-medium rounded-md px-4 py-2"
                >
                    "Load"
                </button>

                <label class="flex items-center gap-2 text-sm text-gray-700 ml-auto">
                    <input
                        type="checkbox"
                        prop:checked=move || view_state.with(|state| state.show_details)
                        on:change=move |ev| {
                            let checked = event_target_checked(&ev);
                            view_state.update(|state| state.show_details = checked);
                        }
                    />
                    "Show details"
                </label>
            </form>

            <Suspense fallback=move || view! { <Loading /> }>
                {move || {
                    statements.get().map(|loaded| {
                        // Dereference SendWrapper to access the ticket and result
                        let (loaded_ticket, result) = &*loaded;
                        if !sequencer.with_value(|seq| seq.is_current(*loaded_ticket)) {
                            return view! { <Loading /> }.into_any();
                        }

                        match result {
                            Ok(response) => {
                                let report = build_report(response, &view_state.get(), &EnglishLabelPolicy);
                                view! { <ReportView report=report view_state=view_state /> }.into_any()
                            }
                            Err(message) => view! {
                                <div class="bg-red-50 border-l-4 border-red-400 p-4 rounded-lg text-sm text-red-700">
                                    {message.clone()}
                                </div>
                            }
                            .into_any(),
                        }
                    })
                }}
            </Suspense>
        </div>
    }
}
