use crate::pages::week_calendar::view_model::WeekCalendarViewModel;
use leptos::*;

#[component]
pub fn WeekSummary(vm: WeekCalendarViewModel) -> impl IntoView {
    let window = vm.window;
    let loading = vm.loading;
    let holiday_count = {
        let vm = vm.clone();
        move || format!("休日 {} 日", vm.holiday_count())
    };

    view! {
        <div class="flex flex-col gap-1 md:flex-row md:items-center md:justify-between">
            <div>
                <h2 class="text-lg font-semibold text-fg">{"今週の授業日"}</h2>
                <p class="text-sm text-fg-muted">
                    {move || window.get().range_label()}
                    {" ・ "}
                    <span class="font-semibold">{holiday_count}</span>
                </p>
            </div>
            <button
                type="button"
                class="px-3 py-1 rounded border text-sm text-fg-muted hover:bg-action-ghost-bg-hover disabled:opacity-50"
                disabled=move || loading.get()
                on:click=move |_| vm.refresh()
            >
                {move || if loading.get() { "読み込み中..." } else { "再取得" }}
            </button>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::{
        api::{DateKey, DayStatus},
        pages::week_calendar::store::StatusMap,
        test_support::{fake::FakeDayStatusRepository, ssr::render_to_string},
    };
    use chrono::NaiveDate;
    use std::rc::Rc;

    #[test]
    fn summary_shows_range_and_holiday_count() {
        let html = render_to_string(|| {
            let vm = WeekCalendarViewModel::new(
                Rc::new(FakeDayStatusRepository::new()),
                Signal::derive(|| true),
                NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            );
            let records = [16, 17, 25].map(|day| DayStatus {
                date: DateKey::new(NaiveDate::from_ymd_opt(2024, 3, day).unwrap()),
                is_holiday: true,
                updated_at: None,
            });
            let window = vm.window.get_untracked();
            vm.reconciler.update(|r| {
                let stamp = r.stamp();
                r.hydrate(&window, StatusMap::from_records(records), stamp)
            });
            view! { <WeekSummary vm=vm /> }
        });
        assert!(html.contains("3/14 〜 3/20"));
        assert!(html.contains("休日 2 日"));
        assert!(html.contains("再取得"));
    }
}
