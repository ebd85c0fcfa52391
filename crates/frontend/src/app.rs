use crate::reports::ReportPage;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <main class="app-main">
            <ReportPage />
        </main>
    }
}
