use crate::{
    api::DateKey,
    pages::week_calendar::{
        utils::{day_label, weekday_label, DayTone},
        view_model::WeekCalendarViewModel,
    },
};
use chrono::Datelike;
use leptos::*;

#[component]
pub fn DayCell(day: DateKey, vm: WeekCalendarViewModel) -> impl IntoView {
    let weekday = weekday_label(day.date().weekday());
    let today = vm.today;
    let tone = {
        let vm = vm.clone();
        move || vm.tone(day)
    };
    let pending = {
        let vm = vm.clone();
        move || vm.is_pending(day)
    };
    let disabled = {
        let vm = vm.clone();
        move || !vm.can_toggle(day)
    };
    let class = {
        let tone = tone.clone();
        move || {
            format!(
                "flex flex-col items-center gap-1 rounded-lg border px-2 py-3 text-sm transition {} {}",
                tone().cell_class(),
                if today.get() == day.date() { "ring-2 ring-action-primary-bg" } else { "" },
            )
        }
    };
    let pressed = {
        let tone = tone.clone();
        move || if tone() == DayTone::Holiday { "true" } else { "false" }
    };
    let busy = {
        let pending = pending.clone();
        move || if pending() { "true" } else { "false" }
    };
    let status_label = move || if pending() { "保存中..." } else { tone().label() };

    view! {
        <button
            type="button"
            class=class
            data-date=day.to_string()
            aria-pressed=pressed
            aria-busy=busy
            disabled=disabled
            on:click=move |_| vm.toggle(day)
        >
            <span class="text-xs text-fg-muted">{weekday}</span>
            <span class="text-lg font-semibold">{day_label(day)}</span>
            <span class="text-xs">{status_label}</span>
        </button>
    }
}
