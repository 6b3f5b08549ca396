#![allow(dead_code)]

use friendgraph_core::{
    Friendship, GraphRemote, RemoteError, RemoteResult, RemoteUser, UserInput, UserPatch,
};
use serde_json::{json, Value};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tokio::sync::Notify;
use uuid::Uuid;

/// One recorded write call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create(UserInput),
    Update(String, UserPatch),
    Delete(String),
    Link(String, String),
    Unlink(String, String),
}

#[derive(Debug, Clone)]
struct StoredUser {
    id: String,
    username: String,
    age: u32,
    hobbies: Vec<String>,
}

/// In-memory remote graph store with failure injection.
#[derive(Default)]
pub struct FakeRemote {
    users: RefCell<Vec<StoredUser>>,
    friendships: RefCell<Vec<Friendship>>,
    calls: RefCell<Vec<Call>>,
    fetch_count: Cell<usize>,
    next_write_error: RefCell<Option<RemoteError>>,
    next_fetch: RefCell<Option<RemoteResult<Value>>>,
    fail_fetches: Cell<bool>,
    yield_on_write: Cell<bool>,
    write_gate: RefCell<Option<Rc<Notify>>>,
}

impl FakeRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_user(&self, id: &str, username: &str, age: u32, hobbies: &[&str]) {
        self.users.borrow_mut().push(StoredUser {
            id: id.to_string(),
            username: username.to_string(),
            age,
            hobbies: hobbies.iter().map(|h| h.to_string()).collect(),
        });
    }

    pub fn seed_friendship(&self, id: &str, source: &str, target: &str) {
        self.friendships
            .borrow_mut()
            .push(Friendship::new(id, source, target));
    }

    /// Fails the next write call with `err`.
    pub fn fail_next_write(&self, err: RemoteError) {
        *self.next_write_error.borrow_mut() = Some(err);
    }

    /// Returns `result` from the next fetch instead of the stored graph.
    pub fn respond_to_next_fetch(&self, result: RemoteResult<Value>) {
        *self.next_fetch.borrow_mut() = Some(result);
    }

    /// Makes every fetch fail until reset.
    pub fn set_fetch_failing(&self, failing: bool) {
        self.fail_fetches.set(failing);
    }

    /// Every write yields to the scheduler once before applying.
    pub fn yield_on_write(&self) {
        self.yield_on_write.set(true);
    }

    /// Writes wait for a permit on the returned gate before applying.
    pub fn gate_writes(&self) -> Rc<Notify> {
        let gate = Rc::new(Notify::new());
        *self.write_gate.borrow_mut() = Some(Rc::clone(&gate));
        gate
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn fetch_count(&self) -> usize {
        self.fetch_count.get()
    }

    pub fn user_hobbies(&self, id: &str) -> Option<Vec<String>> {
        self.users
            .borrow()
            .iter()
            .find(|user| user.id == id)
            .map(|user| user.hobbies.clone())
    }

    /// Current graph in the `GET /api/graph` wire shape.
    pub fn graph_body(&self) -> Value {
        let friendships = self.friendships.borrow();
        let nodes: Vec<Value> = self
            .users
            .borrow()
            .iter()
            .map(|user| {
                let friends = friendships.iter().filter(|f| f.touches(&user.id)).count();
                let node_type = if friends > 5 {
                    "HighScoreNode"
                } else {
                    "LowScoreNode"
                };
                json!({
                    "id": user.id,
                    "type": node_type,
                    "position": { "x": 0, "y": 0 },
                    "data": {
                        "label": user.username,
                        "age": user.age,
                        "hobbies": user.hobbies,
                        "popularityScore": friends,
                        "createdAt": "2025-01-01T00:00:00.000Z"
                    }
                })
            })
            .collect();
        let edges: Vec<Value> = friendships
            .iter()
            .map(|f| json!({ "id": f.id, "source": f.source, "target": f.target }))
            .collect();
        json!({ "nodes": nodes, "edges": edges })
    }

    async fn begin_write(&self, call: Call) -> RemoteResult<()> {
        self.calls.borrow_mut().push(call);
        if self.yield_on_write.get() {
            tokio::task::yield_now().await;
        }
        let gate = self.write_gate.borrow().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        match self.next_write_error.borrow_mut().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn has_user(&self, id: &str) -> bool {
        self.users.borrow().iter().any(|user| user.id == id)
    }

    fn not_found() -> RemoteError {
        RemoteError::Status {
            status: 404,
            message: Some("User not found".to_string()),
        }
    }
}

impl GraphRemote for FakeRemote {
    async fn fetch_graph(&self) -> RemoteResult<Value> {
        self.fetch_count.set(self.fetch_count.get() + 1);
        if let Some(result) = self.next_fetch.borrow_mut().take() {
            return result;
        }
        if self.fail_fetches.get() {
            return Err(RemoteError::Transport("connection refused".to_string()));
        }
        Ok(self.graph_body())
    }

    async fn create_user(&self, input: &UserInput) -> RemoteResult<RemoteUser> {
        self.begin_write(Call::Create(input.clone())).await?;
        let id = Uuid::new_v4().to_string();
        self.users.borrow_mut().push(StoredUser {
            id: id.clone(),
            username: input.username.clone(),
            age: input.age,
            hobbies: input.hobbies.clone(),
        });
        Ok(RemoteUser {
            id: Some(id),
            username: input.username.clone(),
        })
    }

    async fn update_user(&self, user_id: &str, patch: &UserPatch) -> RemoteResult<RemoteUser> {
        self.begin_write(Call::Update(user_id.to_string(), patch.clone()))
            .await?;
        let mut users = self.users.borrow_mut();
        let user = users
            .iter_mut()
            .find(|user| user.id == user_id)
            .ok_or_else(Self::not_found)?;
        if let Some(username) = &patch.username {
            user.username = username.clone();
        }
        if let Some(age) = patch.age {
            user.age = age;
        }
        if let Some(hobbies) = &patch.hobbies {
            user.hobbies = hobbies.clone();
        }
        Ok(RemoteUser {
            id: Some(user.id.clone()),
            username: user.username.clone(),
        })
    }

    async fn delete_user(&self, user_id: &str) -> RemoteResult<()> {
        self.begin_write(Call::Delete(user_id.to_string())).await?;
        if !self.has_user(user_id) {
            return Err(Self::not_found());
        }
        self.users.borrow_mut().retain(|user| user.id != user_id);
        self.friendships
            .borrow_mut()
            .retain(|friendship| !friendship.touches(user_id));
        Ok(())
    }

    async fn link_users(&self, user_id: &str, friend_id: &str) -> RemoteResult<()> {
        self.begin_write(Call::Link(user_id.to_string(), friend_id.to_string()))
            .await?;
        if user_id == friend_id {
            return Err(RemoteError::Validation(vec![
                "self-link not allowed".to_string()
            ]));
        }
        if !self.has_user(user_id) || !self.has_user(friend_id) {
            return Err(Self::not_found());
        }
        let id = Uuid::new_v4().to_string();
        self.friendships
            .borrow_mut()
            .push(Friendship::new(id, user_id, friend_id));
        Ok(())
    }

    async fn unlink_users(&self, user_id: &str, friend_id: &str) -> RemoteResult<()> {
        self.begin_write(Call::Unlink(user_id.to_string(), friend_id.to_string()))
            .await?;
        self.friendships.borrow_mut().retain(|friendship| {
            !(friendship.touches(user_id) && friendship.touches(friend_id))
        });
        Ok(())
    }
}

/// Seven users `u0..u6` with names `User 0..User 6`.
pub fn seven_user_remote() -> FakeRemote {
    let remote = FakeRemote::new();
    for i in 0..7 {
        remote.seed_user(&format!("u{i}"), &format!("User {i}"), 20 + i, &[]);
    }
    remote
}
