//! In-process backends for driving the client state machines.
//!
//! [`ScriptedBackend`] answers from canned data, records every call, can be
//! told to fail a given operation, and can hold a response until the test
//! releases it. Holding is what lets a test reorder concurrent completions.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use screentab::api::Backend;
use screentab::types::{
    AppError, Credentials, EchoedMessage, Message, Result, SendRequest, SendResponse,
    SendTarget, ThreadHistory, ThreadSummary, UserRow, UsersPage,
};
use tokio::sync::Semaphore;

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CheckAuth,
    Login(String),
    Register(String),
    Logout,
    ListThreads,
    History(String),
    Send(SendTarget, String),
    Delete(String),
    Wipe,
    Users(u32, u32),
}

/// Operation names accepted by [`ScriptedBackend::fail`] and [`ScriptedBackend::hold`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Op {
    CheckAuth,
    Login,
    Register,
    Logout,
    ListThreads,
    History(String),
    Send,
    Delete,
    Wipe,
    Users,
}

/// A held response. Dropping it does not release anything.
#[derive(Clone)]
pub struct Gate(Arc<Semaphore>);

impl Gate {
    fn new() -> Self {
        Self(Arc::new(Semaphore::new(0)))
    }

    pub fn release(&self) {
        self.0.add_permits(1);
    }

    async fn pass(&self) {
        if let Ok(permit) = self.0.acquire().await {
            permit.forget();
        }
    }
}

#[derive(Default)]
struct Script {
    authenticated: bool,
    threads: Vec<ThreadSummary>,
    histories: HashMap<String, ThreadHistory>,
    users: Vec<UserRow>,
    next_thread: Option<String>,
    failures: HashMap<Op, AppError>,
    gates: HashMap<Op, Gate>,
    calls: Vec<Call>,
}

#[derive(Default)]
pub struct ScriptedBackend {
    script: Mutex<Script>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn authenticated(self) -> Self {
        self.script.lock().authenticated = true;
        self
    }

    /// Add a persisted thread with the given history texts (all assistant messages).
    pub fn with_thread(self, id: &str, title: Option<&str>, texts: &[&str]) -> Self {
        {
            let mut script = self.script.lock();
            script.threads.push(ThreadSummary {
                id: id.to_string(),
                title: title.map(str::to_string),
            });
            script.histories.insert(
                id.to_string(),
                ThreadHistory {
                    thread_id: id.to_string(),
                    title: title.map(str::to_string),
                    messages: texts.iter().map(|t| Message::assistant(*t)).collect(),
                },
            );
        }
        self
    }

    pub fn with_users(self, count: usize) -> Self {
        self.script.lock().users = (0..count)
            .map(|i| UserRow {
                email: format!("user{i}@example.com"),
                created_at: Utc::now(),
            })
            .collect();
        self
    }

    /// Thread id assigned to the next send that creates a thread.
    pub fn assign_thread_id(&self, id: &str) {
        self.script.lock().next_thread = Some(id.to_string());
    }

    pub fn fail(&self, op: Op, error: AppError) {
        self.script.lock().failures.insert(op, error);
    }

    pub fn clear_failure(&self, op: &Op) {
        self.script.lock().failures.remove(op);
    }

    /// Hold responses for `op` until the returned gate is released, once per response.
    pub fn hold(&self, op: Op) -> Gate {
        let gate = Gate::new();
        self.script.lock().gates.insert(op, gate.clone());
        gate
    }

    /// Stop holding `op`. Calls already waiting stay held until their gate is released.
    pub fn unhold(&self, op: &Op) {
        self.script.lock().gates.remove(op);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.script.lock().calls.clone()
    }

    pub fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.script.lock().calls.iter().filter(|c| matches(c)).count()
    }

    /// Record the call, wait on its gate, then return the scripted failure if any.
    async fn enter(&self, call: Call, op: Op) -> Result<()> {
        let gate = {
            let mut script = self.script.lock();
            script.calls.push(call);
            script.gates.get(&op).cloned()
        };
        if let Some(gate) = gate {
            gate.pass().await;
        }
        match self.script.lock().failures.get(&op) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

fn echoed(id: String, text: &str) -> EchoedMessage {
    EchoedMessage {
        id,
        text: text.to_string(),
        timestamp: Utc::now(),
    }
}

#[async_trait]
impl Backend for ScriptedBackend {
    async fn check_auth(&self) -> Result<bool> {
        self.enter(Call::CheckAuth, Op::CheckAuth).await?;
        Ok(self.script.lock().authenticated)
    }

    async fn login(&self, credentials: &Credentials) -> Result<()> {
        self.enter(Call::Login(credentials.email.clone()), Op::Login)
            .await
    }

    async fn register(&self, credentials: &Credentials) -> Result<()> {
        self.enter(Call::Register(credentials.email.clone()), Op::Register)
            .await
    }

    async fn logout(&self) -> Result<()> {
        self.enter(Call::Logout, Op::Logout).await
    }

    async fn list_threads(&self) -> Result<Vec<ThreadSummary>> {
        self.enter(Call::ListThreads, Op::ListThreads).await?;
        Ok(self.script.lock().threads.clone())
    }

    async fn thread_history(&self, thread_id: &str) -> Result<ThreadHistory> {
        self.enter(
            Call::History(thread_id.to_string()),
            Op::History(thread_id.to_string()),
        )
        .await?;
        self.script
            .lock()
            .histories
            .get(thread_id)
            .cloned()
            .ok_or_else(|| AppError::Request {
                code: Some("NOT_FOUND".to_string()),
                message: "Not found".to_string(),
            })
    }

    async fn send_message(&self, request: &SendRequest) -> Result<SendResponse> {
        self.enter(
            Call::Send(request.target.clone(), request.text.clone()),
            Op::Send,
        )
        .await?;

        let mut script = self.script.lock();
        let (thread_id, title) = match &request.target {
            SendTarget::Thread(id) => (id.clone(), None),
            SendTarget::Title(title) => {
                let id = script
                    .next_thread
                    .take()
                    .unwrap_or_else(|| format!("thread-{}", script.calls.len()));
                (id, Some(title.clone()))
            }
        };
        let n = script.calls.len();
        Ok(SendResponse {
            thread_id: Some(thread_id),
            title,
            user_message: echoed(format!("u{n}"), &request.text),
            assistant_message: echoed(format!("a{n}"), &format!("About {}", request.text)),
        })
    }

    async fn delete_thread(&self, thread_id: &str) -> Result<()> {
        self.enter(Call::Delete(thread_id.to_string()), Op::Delete)
            .await?;
        // Histories stay readable so late fetches still answer.
        self.script.lock().threads.retain(|t| t.id != thread_id);
        Ok(())
    }

    async fn wipe_threads(&self) -> Result<()> {
        self.enter(Call::Wipe, Op::Wipe).await?;
        let mut script = self.script.lock();
        script.threads.clear();
        script.histories.clear();
        Ok(())
    }

    async fn list_users(&self, page: u32, limit: u32) -> Result<UsersPage> {
        self.enter(Call::Users(page, limit), Op::Users).await?;
        let script = self.script.lock();
        let start = (page.saturating_sub(1) as usize).saturating_mul(limit as usize);
        Ok(UsersPage {
            items: script
                .users
                .iter()
                .skip(start)
                .take(limit as usize)
                .cloned()
                .collect(),
            total: script.users.len() as u64,
        })
    }
}

/// Let spawned tasks run up to their next pending await.
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}
