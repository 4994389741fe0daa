use super::{
    reconciler::{self, LoadStamp, ToggleContext, ToggleReconciler},
    repository::{DayStatusRepository, WeekCalendarRepository},
    store::{load_statuses, StatusMap},
    types::DayStatusError,
    utils::{resolve_window, DayTone, WeekWindow},
};
use crate::{
    api::{ApiClient, DateKey},
    components::toast::{NoticeKind, Notifier, ToastState},
    config,
    utils::time::{now_in_app_tz, today_in_app_tz},
};
use chrono::{DateTime, NaiveDate, TimeZone};
use leptos::*;
use std::rc::Rc;

/// What a bulk read was dispatched for.
#[derive(Debug, Clone, Copy)]
struct LoadTicket {
    generation: u32,
    window: WeekWindow,
    stamp: LoadStamp,
}

#[derive(Clone)]
pub struct WeekCalendarViewModel {
    pub window: RwSignal<WeekWindow>,
    pub today: RwSignal<NaiveDate>,
    pub reconciler: RwSignal<ToggleReconciler>,
    pub loading: RwSignal<bool>,
    pub load_error: RwSignal<Option<DayStatusError>>,
    pub toast: ToastState,
    pub is_admin: Signal<bool>,
    load_generation: RwSignal<u32>,
    repository: Rc<dyn DayStatusRepository>,
}

impl WeekCalendarViewModel {
    pub fn new(
        repository: Rc<dyn DayStatusRepository>,
        is_admin: Signal<bool>,
        today: NaiveDate,
    ) -> Self {
        Self {
            window: create_rw_signal(WeekWindow::anchored_at(today)),
            today: create_rw_signal(today),
            reconciler: create_rw_signal(ToggleReconciler::new()),
            loading: create_rw_signal(false),
            load_error: create_rw_signal(None),
            toast: ToastState::new(),
            is_admin,
            load_generation: create_rw_signal(0),
            repository,
        }
    }

    fn toggle_context(&self) -> ToggleContext {
        ToggleContext {
            repository: self.repository.clone(),
            notifier: Rc::new(self.toast),
            timeout: config::request_timeout(),
        }
    }

    pub fn is_holiday(&self, key: DateKey) -> bool {
        self.reconciler.with(|r| r.is_holiday(&key))
    }

    pub fn is_pending(&self, key: DateKey) -> bool {
        self.reconciler.with(|r| r.is_pending(&key))
    }

    pub fn tone(&self, key: DateKey) -> DayTone {
        DayTone::from_flag(self.is_holiday(key))
    }

    pub fn holiday_count(&self) -> usize {
        let window = self.window.get();
        self.reconciler
            .with(|r| r.statuses().holiday_count(window.keys()))
    }

    pub fn can_toggle(&self, key: DateKey) -> bool {
        self.is_admin.get() && !self.is_pending(key)
    }

    fn next_ticket(&self) -> LoadTicket {
        let generation = self.load_generation.get_untracked().wrapping_add(1);
        self.load_generation.set(generation);
        LoadTicket {
            generation,
            window: self.window.get_untracked(),
            stamp: self.reconciler.with_untracked(|r| r.stamp()),
        }
    }

    /// One bulk read for the current window. Results of superseded loads are dropped.
    pub fn load(&self) {
        let ticket = self.next_ticket();
        self.loading.set(true);

        let vm = self.clone();
        spawn_local(async move {
            let result =
                load_statuses(vm.repository.as_ref(), &ticket.window, config::request_timeout())
                    .await;
            vm.apply_load(ticket, result);
        });
    }

    fn apply_load(&self, ticket: LoadTicket, result: Result<StatusMap, DayStatusError>) {
        if self.load_generation.get_untracked() != ticket.generation {
            log::debug!("Dropping superseded day status load #{}", ticket.generation);
            return;
        }
        match result {
            Ok(statuses) => {
                let recovered = self.load_error.get_untracked().is_some();
                self.reconciler
                    .update(|r| r.hydrate(&ticket.window, statuses, ticket.stamp));
                self.load_error.set(None);
                if recovered {
                    self.toast
                        .notify(NoticeKind::Info, "休日設定を再取得しました。".into());
                }
            }
            Err(err) => {
                log::warn!("Day status load failed: {}", err);
                self.load_error.set(Some(err));
            }
        }
        self.loading.set(false);
    }

    /// Re-anchors the window to the current time and reloads.
    pub fn refresh(&self) {
        self.refresh_at(&now_in_app_tz());
    }

    pub fn refresh_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) {
        self.today.set(now.date_naive());
        let next = resolve_window(now);
        if next != self.window.get_untracked() {
            log::info!("Week window moved to {}", next.range_label());
            self.window.set(next);
        }
        self.load();
    }

    pub fn toggle(&self, key: DateKey) {
        let is_admin = self.is_admin.get_untracked();
        if let Some(task) =
            reconciler::toggle(&self.reconciler, &self.toggle_context(), key, is_admin)
        {
            spawn_local(async move {
                task.await;
            });
        }
    }
}

pub fn use_week_calendar_view_model(is_admin: Signal<bool>) -> WeekCalendarViewModel {
    let api = use_context::<ApiClient>().unwrap_or_default();
    let repository: Rc<dyn DayStatusRepository> =
        Rc::new(WeekCalendarRepository::new_with_client(Rc::new(api)));
    mount_view_model(repository, is_admin, today_in_app_tz())
}

/// Builds the view model and issues the single bulk read for its window.
pub fn mount_view_model(
    repository: Rc<dyn DayStatusRepository>,
    is_admin: Signal<bool>,
    today: NaiveDate,
) -> WeekCalendarViewModel {
    let vm = WeekCalendarViewModel::new(repository, is_admin, today);
    vm.load();
    vm
}
