use crate::{
    api::{HttpRecordsApi, RecordsApi},
    config::RuntimeConfiguration,
    error::DashboardResult,
    maud_conveniences::render_sidebar,
    render,
    routes::sse::SseEvent,
    store::Store,
};
use maud::{DOCTYPE, Markup, html};
use std::sync::Arc;
use tokio::sync::{
    Mutex, MutexGuard,
    broadcast::{Receiver, Sender, channel},
};

#[derive(Clone, Debug)]
pub struct DashboardState {
    api: Arc<dyn RecordsApi>,
    store: Arc<Mutex<Store>>,
    config: RuntimeConfiguration,
    sse_events_sender: Sender<SseEvent>,
}

impl DashboardState {
    pub fn new(config: RuntimeConfiguration) -> DashboardResult<Self> {
        let api = HttpRecordsApi::new(config.api_config())?;
        Ok(Self::with_api(config, Arc::new(api)))
    }

    pub fn with_api(config: RuntimeConfiguration, api: Arc<dyn RecordsApi>) -> Self {
        let store = Store::new(config.display_config().with_courses);
        let (tx, _rx) = channel(16);

        Self {
            api,
            store: Arc::new(Mutex::new(store)),
            config,
            sse_events_sender: tx,
        }
    }

    pub fn api(&self) -> &dyn RecordsApi {
        self.api.as_ref()
    }

    ///never hold this across a request to the api
    pub async fn store(&self) -> MutexGuard<'_, Store> {
        self.store.lock().await
    }

    pub const fn config(&self) -> &RuntimeConfiguration {
        &self.config
    }

    pub async fn render_panel(&self) -> Markup {
        let display_config = self.config.display_config();
        let store = self.store().await;
        render::panel(&store, &display_config)
    }

    #[allow(clippy::needless_pass_by_value)] //to allow direct html! usage
    pub fn render(&self, markup: Markup) -> Markup {
        let sidebar = render_sidebar(self.config.display_config().with_courses);

        html! {
            (DOCTYPE)
            html {
                head {
                    meta charset="UTF-8" {}
                    meta name="viewport" content="width=device-width, initial-scale=1.0" {}
                    script src="https://unpkg.com/htmx.org@2.0.4" integrity="sha384-HGfztofotfshcF7+8n44JQL2oJmowVChPTg48S+jvZoztPfvwD79OC/LTtG6dMp+" crossorigin="anonymous" {}
                    script src="https://unpkg.com/htmx-ext-sse@2.2.3" integrity="sha384-Y4gc0CK6Kg+hmulDc6rZPJu0tqvk7EWlih0Oh+2OkAi1ZDlCbBDCQEE2uVk472Ky" crossorigin="anonymous" {}
                    script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4" {}
                    title { "Dashboard" }
                }
                body class="bg-gray-900 min-h-screen flex flex-row text-white" {
                    (sidebar)
                    main id="panel" hx-ext="sse" sse-connect="/sse_feed" class="flex-1 p-8 overflow-y-auto" {
                        (markup)
                    }
                }
            }
        }
    }

    pub fn subscribe_to_sse_feed(&self) -> Receiver<SseEvent> {
        self.sse_events_sender.subscribe()
    }

    pub fn send_sse_event(&self, event: SseEvent) {
        //no tabs open means no receivers, which is fine
        let _ = self.sse_events_sender.send(event);
    }
}
