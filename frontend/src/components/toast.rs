use leptos::*;

pub const TOAST_LIFETIME_MS: u32 = 4_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    pub fn classes(&self) -> &'static str {
        match self {
            ToastKind::Success => "bg-status-success-bg border-status-success-border text-status-success-text",
            ToastKind::Error => "bg-status-error-bg border-status-error-border text-status-error-text",
            ToastKind::Info => "bg-surface-elevated border-border text-fg",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// Page-wide notification queue, provided through context.
#[derive(Clone, Copy)]
pub struct Toasts {
    items: RwSignal<Vec<Toast>>,
    next_id: StoredValue<u64>,
}

impl Toasts {
    fn new() -> Self {
        Self {
            items: create_rw_signal(Vec::new()),
            next_id: store_value(1),
        }
    }

    pub fn items(&self) -> Signal<Vec<Toast>> {
        self.items.into()
    }

    pub fn push(&self, kind: ToastKind, message: impl Into<String>) -> u64 {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        self.items.update(|items| {
            items.push(Toast {
                id,
                kind,
                message: message.into(),
            })
        });
        #[cfg(target_arch = "wasm32")]
        {
            let toasts = *self;
            gloo_timers::callback::Timeout::new(TOAST_LIFETIME_MS, move || toasts.dismiss(id))
                .forget();
        }
        id
    }

    pub fn success(&self, message: impl Into<String>) -> u64 {
        self.push(ToastKind::Success, message)
    }

    pub fn error(&self, message: impl Into<String>) -> u64 {
        self.push(ToastKind::Error, message)
    }

    pub fn dismiss(&self, id: u64) {
        self.items.update(|items| items.retain(|toast| toast.id != id));
    }
}

pub fn use_toasts() -> Toasts {
    match use_context::<Toasts>() {
        Some(toasts) => toasts,
        None => {
            let toasts = Toasts::new();
            provide_context(toasts);
            toasts
        }
    }
}

#[component]
pub fn ToastHost() -> impl IntoView {
    let toasts = use_toasts();
    view! {
        <div class="fixed bottom-4 right-4 z-[80] space-y-2" aria-live="polite">
            <For
                each=move || toasts.items().get()
                key=|toast| toast.id
                children=move |toast: Toast| {
                    let id = toast.id;
                    view! {
                        <div class=format!("flex items-start gap-3 rounded border px-4 py-3 shadow {}", toast.kind.classes())>
                            <p class="text-sm">{toast.message}</p>
                            <button
                                type="button"
                                aria-label="Dismiss"
                                class="text-sm opacity-70 hover:opacity-100"
                                on:click=move |_| toasts.dismiss(id)
                            >
                                {"✕"}
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
