use leptos::*;

/// Non-blocking error banner with an optional retry action.
#[component]
pub fn InlineErrorMessage(
    message: Signal<Option<String>>,
    #[prop(optional)] on_retry: Option<Callback<()>>,
) -> impl IntoView {
    view! {
        <Show when=move || message.get().is_some() fallback=|| ()>
            <div
                class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded flex items-center justify-between gap-3"
                role="alert"
            >
                <p class="text-sm">{move || message.get().unwrap_or_default()}</p>
                {on_retry.map(|retry| {
                    view! {
                        <button
                            type="button"
                            class="px-3 py-1 rounded border border-status-error-border text-sm hover:opacity-75"
                            on:click=move |_| retry.call(())
                        >
                            "再試行"
                        </button>
                    }
                })}
            </div>
        </Show>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn renders_message_and_retry_button() {
        let html = render_to_string(|| {
            let message = create_rw_signal(Some("読み込みに失敗しました".to_string()));
            view! {
                <InlineErrorMessage
                    message=message.into()
                    on_retry=Callback::new(|_| ())
                />
            }
        });
        assert!(html.contains("読み込みに失敗しました"));
        assert!(html.contains("再試行"));
    }

    #[test]
    fn renders_nothing_without_message() {
        let html = render_to_string(|| {
            let message = create_rw_signal(None::<String>);
            view! { <InlineErrorMessage message=message.into() /> }
        });
        assert!(!html.contains("role=\"alert\""));
    }
}
