use super::{
    components::{day_cell::DayCell, summary::WeekSummary},
    view_model::{use_week_calendar_view_model, WeekCalendarViewModel},
};
use crate::components::{error::InlineErrorMessage, toast::Toast};
use leptos::*;

#[component]
pub fn WeekCalendarPanel(vm: WeekCalendarViewModel) -> impl IntoView {
    let window = vm.window;
    let load_error = vm.load_error;
    let error_message = Signal::derive(move || load_error.get().map(|err| err.to_string()));
    let retry = {
        let vm = store_value(vm.clone());
        Callback::new(move |_| vm.with_value(|vm| vm.load()))
    };
    let cells_vm = vm.clone();

    view! {
        <section class="bg-surface-elevated shadow rounded-lg p-6 space-y-4">
            <WeekSummary vm=vm.clone() />
            <InlineErrorMessage message=error_message on_retry=retry />
            <div class="grid grid-cols-7 gap-2">
                <For
                    each=move || window.get().keys().to_vec()
                    key=|day| *day
                    children=move |day| view! { <DayCell day=day vm=cells_vm.clone() /> }
                />
            </div>
            <Toast state=vm.toast />
        </section>
    }
}

/// Mounts the widget with its own view model. `is_admin` is supplied by the host.
#[component]
pub fn WeekCalendar(#[prop(into)] is_admin: Signal<bool>) -> impl IntoView {
    let vm = use_week_calendar_view_model(is_admin);
    view! { <WeekCalendarPanel vm=vm /> }
}
