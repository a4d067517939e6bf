use leptos::prelude::*;

use crate::components::FinancialStatements;
use crate::config::CONFIG;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <main class="max-w-7xl mx-auto px-4 py-8 md:py-12">
            <header class="mb-8">
                <h1 class="text-3xl font-bold text-gray-900">{CONFIG.name}</h1>
                <div class="text-gray-600 mt-2">{CONFIG.tagline}</div>
            </header>

            <FinancialStatements />
        </main>
    }
}
