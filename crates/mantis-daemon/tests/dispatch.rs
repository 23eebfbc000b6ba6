//! End-to-end dispatch over the full built-in command set.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::watch;

use mantis_channel::{
    ChannelError, EventSource, GroupMetadata, MessageContent, MessageEvent, MessageKey,
    MessagingClient,
};
use mantis_commands::{CommandRegistry, Dispatcher};
use mantis_daemon::{bootstrap, runner};
use mantis_types::{BotConfig, Jid};

struct FakeClient {
    self_jid: Jid,
    sent: Mutex<Vec<(Jid, String, bool)>>,
    reactions: Mutex<Vec<String>>,
}

impl FakeClient {
    fn new() -> Self {
        Self {
            self_jid: Jid::new("490000000:7@s.whatsapp.net"),
            sent: Mutex::new(Vec::new()),
            reactions: Mutex::new(Vec::new()),
        }
    }

    fn sent_texts(&self) -> Vec<String> {
        self.sent.lock().unwrap().iter().map(|(_, t, _)| t.clone()).collect()
    }
}

#[async_trait]
impl MessagingClient for FakeClient {
    fn self_jid(&self) -> &Jid {
        &self.self_jid
    }

    async fn send_text(
        &self,
        chat: &Jid,
        text: &str,
        quote: Option<&MessageKey>,
    ) -> Result<(), ChannelError> {
        self.sent
            .lock()
            .unwrap()
            .push((chat.clone(), text.to_string(), quote.is_some()));
        Ok(())
    }

    async fn react(&self, _chat: &Jid, _key: &MessageKey, emoji: &str) -> Result<(), ChannelError> {
        self.reactions.lock().unwrap().push(emoji.to_string());
        Ok(())
    }

    async fn group_metadata(&self, _chat: &Jid) -> Result<GroupMetadata, ChannelError> {
        Ok(GroupMetadata::default())
    }
}

/// Event source replaying a fixed script, then reporting shutdown.
struct ScriptedSource {
    batches: Mutex<VecDeque<Result<Vec<MessageEvent>, ChannelError>>>,
}

impl ScriptedSource {
    fn new(batches: Vec<Result<Vec<MessageEvent>, ChannelError>>) -> Self {
        Self {
            batches: Mutex::new(batches.into()),
        }
    }
}

#[async_trait]
impl EventSource for ScriptedSource {
    async fn next_events(&self) -> Result<Vec<MessageEvent>, ChannelError> {
        self.batches
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ChannelError::Shutdown))
    }
}

fn event(body: &str) -> MessageEvent {
    MessageEvent {
        key: MessageKey {
            chat: Jid::new("peer@s.whatsapp.net"),
            id: "M1".into(),
            from_me: false,
            participant: None,
        },
        push_name: Some("Ada".into()),
        content: Some(MessageContent::Text { body: body.into() }),
    }
}

fn setup(owners: &[&str]) -> (Arc<FakeClient>, Dispatcher) {
    let client = Arc::new(FakeClient::new());
    let mut registry = CommandRegistry::new();
    bootstrap::install(&mut registry);
    let config = BotConfig {
        owner_numbers: owners.iter().map(|s| s.to_string()).collect(),
        ..Default::default()
    };
    let dispatcher = Dispatcher::new(Arc::new(registry), client.clone(), config);
    (client, dispatcher)
}

#[tokio::test]
async fn ping_reacts_and_replies() {
    let (client, dispatcher) = setup(&[]);

    dispatcher.handle_incoming(event(".ping")).await;

    assert_eq!(client.sent_texts(), vec!["*Pong!*"]);
    assert_eq!(*client.reactions.lock().unwrap(), vec!["\u{26A1}"]);
    // Replies quote the triggering message.
    assert!(client.sent.lock().unwrap()[0].2);
}

#[tokio::test]
async fn echo_roundtrip_and_usage() {
    let (client, dispatcher) = setup(&[]);

    dispatcher.handle_incoming(event(".echo hello there")).await;
    dispatcher.handle_incoming(event(".say via-alias")).await;
    dispatcher.handle_incoming(event(".echo")).await;

    assert_eq!(
        client.sent_texts(),
        vec!["hello there", "via-alias", "Usage: .echo <text>"]
    );
}

#[tokio::test]
async fn menu_lists_visible_commands_only() {
    let (client, dispatcher) = setup(&[]);

    dispatcher.handle_incoming(event(".help")).await;

    let sent = client.sent_texts();
    assert_eq!(sent.len(), 1);
    let menu = &sent[0];
    assert!(menu.contains(".ping"));
    assert!(menu.contains(".echo"));
    assert!(menu.contains(".whoami"));
    assert!(!menu.contains(".jid"), "hidden command leaked into the menu");
}

#[tokio::test]
async fn jid_requires_owner() {
    let (client, dispatcher) = setup(&["111"]);

    dispatcher.handle_incoming(event(".jid")).await;
    assert!(client.sent_texts().is_empty());

    let mut owner_event = event(".jid");
    owner_event.key.chat = Jid::new("111@s.whatsapp.net");
    dispatcher.handle_incoming(owner_event).await;
    assert_eq!(client.sent_texts(), vec!["111@s.whatsapp.net"]);
}

#[tokio::test]
async fn whoami_reports_name_and_number() {
    let (client, dispatcher) = setup(&["peer"]);

    dispatcher.handle_incoming(event(".whoami")).await;

    let sent = client.sent_texts();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].contains("Name: Ada"));
    assert!(sent[0].contains("Number: peer"));
    assert!(sent[0].contains("Owner: yes"));
}

#[tokio::test]
async fn runner_processes_batches_in_order_and_survives_errors() {
    let (client, dispatcher) = setup(&[]);
    let source = ScriptedSource::new(vec![
        Ok(vec![event(".echo one"), event(".nosuch"), event(".echo two")]),
        Ok(vec![event("plain chatter"), event(".echo three")]),
        Err(ChannelError::Shutdown),
    ]);
    let (_tx, rx) = watch::channel(false);

    runner::run_events(&source, &dispatcher, rx).await;

    assert_eq!(client.sent_texts(), vec!["one", "two", "three"]);
}

#[tokio::test]
async fn runner_stops_on_shutdown_signal() {
    let (client, dispatcher) = setup(&[]);
    // A source that never yields: the shutdown signal must end the loop.
    struct PendingSource;
    #[async_trait]
    impl EventSource for PendingSource {
        async fn next_events(&self) -> Result<Vec<MessageEvent>, ChannelError> {
            std::future::pending().await
        }
    }
    let (tx, rx) = watch::channel(false);

    let loop_task = tokio::spawn(async move {
        runner::run_events(&PendingSource, &dispatcher, rx).await;
    });
    tx.send(true).unwrap();

    tokio::time::timeout(std::time::Duration::from_secs(2), loop_task)
        .await
        .expect("event loop did not stop on shutdown")
        .unwrap();
    assert!(client.sent_texts().is_empty());
}
