//! In-memory policy service and config builders for tests.

use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
};

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::{
    config::{AuthConfig, ComponentConfig, DEFAULT_REQUEST_TIMEOUT},
    PolicyDefinition, PolicyService, RemotePolicy, WardenConfig,
};

/// Build a config from (component, [(policy, spec)]) pairs.
pub(crate) fn config_with(components: &[(&str, &[(&str, &str)])]) -> WardenConfig {
    WardenConfig {
        auth: AuthConfig {
            url: "http://ranger.test".to_owned(),
            user: "admin".to_owned(),
            password: "admin".to_owned(),
            component_classes: components.iter().map(|(c, _)| c.to_string()).collect(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            retry_transient: false,
        },
        components: components
            .iter()
            .map(|(name, policies)| {
                ComponentConfig::new(
                    *name,
                    policies
                        .iter()
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .collect(),
                )
            })
            .collect(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Create(String, String),
    List(String),
    Delete(i64),
}

#[derive(Default)]
struct State {
    policies: HashMap<String, Vec<RemotePolicy>>,
    next_id: i64,
    calls: Vec<Call>,
}

/// Records every call and keeps per-service policy lists.
#[derive(Default)]
pub(crate) struct FakeService {
    state: Mutex<State>,
    fail_create: HashSet<String>,
    fail_delete: HashSet<String>,
    fail_list: HashSet<String>,
}

impl FakeService {
    pub(crate) fn with_remote(self, service: &str, names: &[&str]) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            for name in names {
                state.next_id += 1;
                let id = state.next_id;
                state
                    .policies
                    .entry(service.to_owned())
                    .or_default()
                    .push(RemotePolicy {
                        id,
                        name: name.to_string(),
                    });
            }
        }
        self
    }

    pub(crate) fn failing_create(mut self, name: &str) -> Self {
        self.fail_create.insert(name.to_owned());
        self
    }

    pub(crate) fn failing_delete(mut self, name: &str) -> Self {
        self.fail_delete.insert(name.to_owned());
        self
    }

    pub(crate) fn failing_list(mut self, service: &str) -> Self {
        self.fail_list.insert(service.to_owned());
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub(crate) fn remote_names(&self, service: &str) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .policies
            .get(service)
            .map(|ps| ps.iter().map(|p| p.name.to_owned()).collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl PolicyService for FakeService {
    async fn create_policy(&self, policy: &PolicyDefinition) -> Result<RemotePolicy> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Create(
            policy.service_name.to_owned(),
            policy.name.to_owned(),
        ));
        if self.fail_create.contains(&policy.name) {
            return Err(anyhow!("policy already exists"));
        }
        state.next_id += 1;
        let created = RemotePolicy {
            id: state.next_id,
            name: policy.name.to_owned(),
        };
        state
            .policies
            .entry(policy.service_name.to_owned())
            .or_default()
            .push(created.clone());
        Ok(created)
    }

    async fn list_policies(&self, service_name: &str) -> Result<Vec<RemotePolicy>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::List(service_name.to_owned()));
        if self.fail_list.contains(service_name) {
            return Err(anyhow!("503 Service Unavailable"));
        }
        Ok(state.policies.get(service_name).cloned().unwrap_or_default())
    }

    async fn delete_policy(&self, id: i64) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Delete(id));
        let fail_delete = &self.fail_delete;
        for policies in state.policies.values_mut() {
            if let Some(pos) = policies.iter().position(|p| p.id == id) {
                if fail_delete.contains(&policies[pos].name) {
                    return Err(anyhow!("404 Not Found"));
                }
                policies.remove(pos);
                return Ok(());
            }
        }
        Err(anyhow!("no policy with id {id}"))
    }
}
