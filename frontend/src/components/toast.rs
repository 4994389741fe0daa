use leptos::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// Fire-and-forget, user-visible notification sink.
pub trait Notifier {
    fn notify(&self, kind: NoticeKind, message: String);
}

/// Holds the most recent notice; a newer notice replaces the current one.
#[derive(Debug, Clone, Copy)]
pub struct ToastState {
    notice: RwSignal<Option<Notice>>,
}

impl ToastState {
    pub fn new() -> Self {
        Self {
            notice: create_rw_signal(None),
        }
    }

    pub fn current(&self) -> Option<Notice> {
        self.notice.get()
    }

    pub fn dismiss(&self) {
        self.notice.set(None);
    }
}

impl Default for ToastState {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for ToastState {
    fn notify(&self, kind: NoticeKind, message: String) {
        self.notice.set(Some(Notice { kind, message }));
    }
}

fn toast_class(kind: NoticeKind) -> &'static str {
    match kind {
        NoticeKind::Error => {
            "bg-status-error-bg border border-status-error-border text-status-error-text"
        }
        NoticeKind::Info => {
            "bg-status-success-bg border border-status-success-border text-status-success-text"
        }
    }
}

#[component]
pub fn Toast(state: ToastState) -> impl IntoView {
    view! {
        <Show when=move || state.current().is_some() fallback=|| ()>
            {move || {
                state
                    .current()
                    .map(|notice| {
                        let role = if notice.kind == NoticeKind::Error { "alert" } else { "status" };
                        view! {
                            <div
                                class=format!(
                                    "fixed bottom-4 right-4 z-50 max-w-sm px-4 py-3 rounded shadow-lg flex items-start gap-3 {}",
                                    toast_class(notice.kind),
                                )
                                role=role
                            >
                                <p class="text-sm flex-1">{notice.message}</p>
                                <button
                                    type="button"
                                    class="text-sm opacity-75 hover:opacity-100"
                                    aria-label="閉じる"
                                    on:click=move |_| state.dismiss()
                                >
                                    "×"
                                </button>
                            </div>
                        }
                    })
            }}
        </Show>
    }
}
