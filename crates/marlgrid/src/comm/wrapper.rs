//! Environment wrapper that adds a broadcast text channel.

use super::channel::{CommunicationChannel, JointMessage};
use crate::config::CommConfig;
use crate::env::{Action, MultiAgentEnv, MultiAgentStep, Observation};
use crate::spaces::{Dict, DynSpace};
use crate::{MarlGridError, Result};
use std::collections::BTreeMap;

/// Key of the environment part of a joint action
pub const ACTIONS_KEY: &str = "actions";
/// Key of a non-dict base observation once messages are added
pub const ENV_KEY: &str = "env";
/// Key of the message part of joint actions and observations
pub const MESSAGES_KEY: &str = "messages";

/// Adds a [`CommunicationChannel`] to a multi-agent environment.
///
/// Each agent acts with `{actions: <env action>, messages: <text>}` and
/// observes its base observation dict with an extra `messages` entry holding
/// the joint message of the step.
pub struct CommWrapper<E: MultiAgentEnv> {
    env: E,
    channel: CommunicationChannel,
}

impl<E: MultiAgentEnv> CommWrapper<E> {
    /// Wrap `env`, sizing the channel to its agent count
    pub fn new(env: E, config: &CommConfig) -> Result<Self> {
        let channel = CommunicationChannel::new(config, env.num_agents())?;
        Ok(Self { env, channel })
    }

    /// Get a reference to the inner environment
    pub fn inner(&self) -> &E {
        &self.env
    }

    /// Get a mutable reference to the inner environment
    pub fn inner_mut(&mut self) -> &mut E {
        &mut self.env
    }

    pub fn channel(&self) -> &CommunicationChannel {
        &self.channel
    }

    /// Separate env actions from messages, checking both shapes and the
    /// message vocabulary before anything is stepped
    fn split(&self, actions: &[Action]) -> Result<(Vec<Action>, Vec<String>)> {
        if actions.len() != self.env.num_agents() {
            return Err(MarlGridError::InvalidAction(format!(
                "expected {} actions, got {}",
                self.env.num_agents(),
                actions.len()
            )));
        }
        let mut env_actions = Vec::with_capacity(actions.len());
        let mut messages = Vec::with_capacity(actions.len());
        for (i, action) in actions.iter().enumerate() {
            let Action::Dict(parts) = action else {
                return Err(MarlGridError::InvalidAction(format!(
                    "agent {i}: expected a dict action, got {action:?}"
                )));
            };
            let env_action = parts.get(ACTIONS_KEY).ok_or_else(|| missing(ACTIONS_KEY, i))?;
            let message = match parts.get(MESSAGES_KEY) {
                Some(Action::Text(text)) => text.clone(),
                Some(other) => {
                    return Err(MarlGridError::InvalidAction(format!(
                        "agent {i}: message must be text, got {other:?}"
                    )))
                }
                None => return Err(missing(MESSAGES_KEY, i)),
            };
            self.channel.validate_message(i, &message)?;
            env_actions.push(env_action.clone());
            messages.push(message);
        }
        Ok((env_actions, messages))
    }
}

fn missing(key: &str, agent: usize) -> MarlGridError {
    MarlGridError::MissingKey {
        key: key.to_string(),
        context: format!("action of agent {agent}"),
    }
}

/// Insert the joint message into each per-agent observation dict. Non-dict
/// observations are nested under `env`.
fn merge(observations: Vec<Observation>, messages: Vec<JointMessage>) -> Result<Vec<Observation>> {
    if observations.len() != messages.len() {
        return Err(MarlGridError::InvalidObservation(format!(
            "{} observations for {} message slots",
            observations.len(),
            messages.len()
        )));
    }
    Ok(observations
        .into_iter()
        .zip(messages)
        .map(|(obs, joint)| {
            let mut map = match obs {
                Observation::Dict(map) => map,
                other => BTreeMap::from([(ENV_KEY.to_string(), other)]),
            };
            map.insert(MESSAGES_KEY.to_string(), joint.to_observation());
            Observation::Dict(map)
        })
        .collect())
}

impl<E: MultiAgentEnv> MultiAgentEnv for CommWrapper<E> {
    fn observation_space(&self) -> DynSpace {
        let messages = self.channel.observation_space();
        match self.env.observation_space() {
            DynSpace::Dict(dict) => DynSpace::Dict(dict.with(MESSAGES_KEY, messages)),
            other => DynSpace::Dict(Dict::from_pairs(vec![
                (ENV_KEY, other),
                (MESSAGES_KEY, messages),
            ])),
        }
    }

    fn action_space(&self) -> DynSpace {
        DynSpace::Dict(Dict::from_pairs(vec![
            (ACTIONS_KEY, self.env.action_space()),
            (MESSAGES_KEY, self.channel.action_space()),
        ]))
    }

    fn reset(&mut self, seed: Option<u64>) -> Result<Vec<Observation>> {
        let observations = self.env.reset(seed)?;
        let messages = self.channel.reset();
        merge(observations, messages)
    }

    fn step(&mut self, actions: &[Action]) -> Result<MultiAgentStep> {
        let (env_actions, messages) = self.split(actions)?;
        let result = self.env.step(&env_actions)?;
        let joint = self.channel.step(&messages)?;
        tracing::trace!(messages = ?self.channel.current().messages(), "Channel advanced");

        Ok(MultiAgentStep {
            observations: merge(result.observations, joint)?,
            ..result
        })
    }

    fn num_agents(&self) -> usize {
        self.env.num_agents()
    }

    fn render(&self) -> Option<String> {
        self.env.render()
    }

    fn close(&mut self) -> Result<()> {
        self.channel.close()?;
        self.env.close()
    }

    fn is_done(&self) -> bool {
        self.env.is_done()
    }
}
