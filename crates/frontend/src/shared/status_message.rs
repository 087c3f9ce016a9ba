//! Transient status banner shared by cart and request pages.
//!
//! Success and error messages from submit/update actions land here and
//! auto-clear after five seconds. A stamp guards against an older timer
//! wiping a newer message.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

const AUTO_CLEAR_MS: u32 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

#[derive(Clone, Copy)]
pub struct StatusChannel {
    message: RwSignal<Option<StatusMessage>>,
    stamp: RwSignal<u64>,
}

impl StatusChannel {
    pub fn new() -> Self {
        Self {
            message: RwSignal::new(None),
            stamp: RwSignal::new(0),
        }
    }

    pub fn message(&self) -> ReadSignal<Option<StatusMessage>> {
        self.message.read_only()
    }

    pub fn success(&self, text: impl Into<String>) {
        self.set(StatusKind::Success, text.into());
    }

    pub fn error(&self, text: impl Into<String>) {
        self.set(StatusKind::Error, text.into());
    }

    pub fn clear(&self) {
        self.message.set(None);
    }

    fn set(&self, kind: StatusKind, text: String) {
        let stamp = self.stamp.get_untracked() + 1;
        self.stamp.set(stamp);
        self.message.set(Some(StatusMessage { kind, text }));

        let channel = *self;
        spawn_local(async move {
            TimeoutFuture::new(AUTO_CLEAR_MS).await;
            if channel.stamp.get_untracked() == stamp {
                channel.message.set(None);
            }
        });
    }
}

impl Default for StatusChannel {
    fn default() -> Self {
        Self::new()
    }
}

pub fn provide_status_channel() -> StatusChannel {
    let channel = StatusChannel::new();
    provide_context(channel);
    channel
}

pub fn use_status() -> StatusChannel {
    use_context::<StatusChannel>().expect("StatusChannel should be provided at the app root")
}
