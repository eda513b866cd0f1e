//! Common test utilities shared across integration tests.

#![allow(dead_code, missing_docs)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use signinkit_core::{
    BrokerError, Credential, CredentialBroker, CredentialHost, CredentialRequest, SignInBridge,
    SignInConfig, SignInEvent, SignInListener,
};
use tokio::sync::Semaphore;

/// A broker that replays queued responses and records every request.
pub struct ScriptedBroker {
    responses: Mutex<VecDeque<Result<Credential, BrokerError>>>,
    requests: Mutex<Vec<CredentialRequest>>,
    clear_result: Mutex<Result<(), BrokerError>>,
    clear_calls: AtomicUsize,
    /// When set, each `get_credential` waits for a permit before answering.
    gate: Option<Semaphore>,
}

impl ScriptedBroker {
    pub fn new(responses: Vec<Result<Credential, BrokerError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
            clear_result: Mutex::new(Ok(())),
            clear_calls: AtomicUsize::new(0),
            gate: None,
        }
    }

    pub fn gated(responses: Vec<Result<Credential, BrokerError>>) -> Self {
        Self {
            gate: Some(Semaphore::new(0)),
            ..Self::new(responses)
        }
    }

    pub fn release(&self, permits: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(permits);
        }
    }

    pub fn fail_clear(&self, error: BrokerError) {
        *self.clear_result.lock().unwrap() = Err(error);
    }

    pub fn requests(&self) -> Vec<CredentialRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) -> usize {
        self.clear_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl CredentialBroker for ScriptedBroker {
    async fn get_credential(&self, request: CredentialRequest) -> Result<Credential, BrokerError> {
        self.requests.lock().unwrap().push(request);
        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(BrokerError::NoCredential {
                message: Some("script exhausted".to_string()),
            }))
    }

    async fn clear_credential_state(&self) -> Result<(), BrokerError> {
        self.clear_calls.fetch_add(1, Ordering::SeqCst);
        self.clear_result.lock().unwrap().clone()
    }
}

/// A host that hands out a single broker and counts constructions.
pub struct TestHost {
    broker: Option<Arc<ScriptedBroker>>,
    active: AtomicBool,
    create_calls: AtomicUsize,
}

impl TestHost {
    pub fn new(broker: Arc<ScriptedBroker>) -> Self {
        Self {
            broker: Some(broker),
            active: AtomicBool::new(true),
            create_calls: AtomicUsize::new(0),
        }
    }

    pub fn without_broker() -> Self {
        Self {
            broker: None,
            active: AtomicBool::new(true),
            create_calls: AtomicUsize::new(0),
        }
    }

    pub fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::SeqCst);
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }
}

impl CredentialHost for TestHost {
    fn has_active_context(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    fn create_broker(&self) -> Option<Arc<dyn CredentialBroker>> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.broker
            .clone()
            .map(|broker| broker as Arc<dyn CredentialBroker>)
    }
}

/// Records every event it receives.
#[derive(Default)]
pub struct RecordingListener {
    events: Mutex<Vec<SignInEvent>>,
}

impl RecordingListener {
    pub fn events(&self) -> Vec<SignInEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl SignInListener for RecordingListener {
    fn on_event(&self, event: SignInEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Everything a test needs to drive a configured bridge.
pub struct Harness {
    pub bridge: Arc<SignInBridge>,
    pub broker: Arc<ScriptedBroker>,
    pub host: Arc<TestHost>,
    pub listener: Arc<RecordingListener>,
}

impl Harness {
    pub fn new(broker: ScriptedBroker) -> Self {
        Self::with_config(broker, SignInConfig::new("abc"))
    }

    pub fn with_config(broker: ScriptedBroker, config: SignInConfig) -> Self {
        let broker = Arc::new(broker);
        let host = Arc::new(TestHost::new(Arc::clone(&broker)));
        let listener = Arc::new(RecordingListener::default());
        let bridge = Arc::new(SignInBridge::with_config(host.clone(), listener.clone(), config));
        Self {
            bridge,
            broker,
            host,
            listener,
        }
    }

    pub fn events(&self) -> Vec<SignInEvent> {
        self.listener.events()
    }
}

pub fn failure(message: &str) -> SignInEvent {
    SignInEvent::Failure {
        message: message.to_string(),
    }
}

pub fn success(id_token: &str, subject: &str, display_name: &str) -> SignInEvent {
    SignInEvent::Success {
        id_token: id_token.to_string(),
        subject: subject.to_string(),
        display_name: display_name.to_string(),
    }
}
