//! Rolling joint-message buffer shared by all agents.

use super::transcript::Transcript;
use crate::config::CommConfig;
use crate::env::Observation;
use crate::spaces::{DynSpace, Text, ALPHABET};
use crate::{MarlGridError, Result};

/// One message per agent, in agent order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct JointMessage(pub Vec<String>);

impl JointMessage {
    /// `n` empty messages
    pub fn empty(n: usize) -> Self {
        Self(vec![String::new(); n])
    }

    pub fn messages(&self) -> &[String] {
        &self.0
    }

    /// All messages run together, as agents observe them
    pub fn joined(&self) -> String {
        self.0.concat()
    }

    pub fn to_observation(&self) -> Observation {
        Observation::Text(self.joined())
    }
}

/// Broadcast text channel: every agent sees the whole joint message.
pub struct CommunicationChannel {
    n_agents: usize,
    max_msg_len: usize,
    vocab_size: usize,
    current: JointMessage,
    history: Vec<JointMessage>,
    transcript: Option<Transcript>,
}

impl CommunicationChannel {
    /// Create a channel for `n_agents`. Rejects vocabularies larger than the alphabet.
    pub fn new(config: &CommConfig, n_agents: usize) -> Result<Self> {
        config.validate(n_agents)?;
        let transcript = config
            .text_save_file
            .as_ref()
            .map(Transcript::open)
            .transpose()?;

        Ok(Self {
            n_agents,
            max_msg_len: config.max_msg_len,
            vocab_size: config.vocab_size,
            current: JointMessage::empty(n_agents),
            history: Vec::new(),
            transcript,
        })
    }

    /// Space of a single agent's message
    pub fn action_space(&self) -> DynSpace {
        DynSpace::Text(Text::new(self.max_msg_len, self.vocab_size))
    }

    /// Space of the joint message an agent observes
    pub fn observation_space(&self) -> DynSpace {
        DynSpace::Text(Text::new(self.n_agents * self.max_msg_len, self.vocab_size))
    }

    pub fn current(&self) -> &JointMessage {
        &self.current
    }

    /// Previous joint messages, oldest first
    pub fn history(&self) -> &[JointMessage] {
        &self.history
    }

    pub fn max_msg_len(&self) -> usize {
        self.max_msg_len
    }

    /// Reject a message holding characters outside the vocabulary. Length is
    /// not checked; `step` truncates.
    pub fn validate_message(&self, agent: usize, message: &str) -> Result<()> {
        let vocab = &ALPHABET[..self.vocab_size];
        match message.chars().find(|&c| !vocab.contains(c)) {
            Some(c) => Err(MarlGridError::InvalidAction(format!(
                "agent {agent}: {c:?} is not in the message vocabulary `{vocab}`"
            ))),
            None => Ok(()),
        }
    }

    /// Clear history and messages. Returns the empty joint message for every agent.
    pub fn reset(&mut self) -> Vec<JointMessage> {
        self.history.clear();
        self.current = JointMessage::empty(self.n_agents);
        self.broadcast()
    }

    /// Post one message per agent. Each is cut to `max_msg_len` characters;
    /// the previous joint message moves to the history.
    ///
    /// A failed transcript write is logged and does not fail the step.
    pub fn step(&mut self, messages: &[String]) -> Result<Vec<JointMessage>> {
        if messages.len() != self.n_agents {
            return Err(MarlGridError::InvalidAction(format!(
                "expected {} messages, got {}",
                self.n_agents,
                messages.len()
            )));
        }
        for (agent, message) in messages.iter().enumerate() {
            self.validate_message(agent, message)?;
        }

        let truncated: Vec<String> = messages
            .iter()
            .map(|m| m.chars().take(self.max_msg_len).collect())
            .collect();
        let previous = std::mem::replace(&mut self.current, JointMessage(truncated));
        self.history.push(previous);

        if let Some(transcript) = self.transcript.as_mut() {
            if let Err(e) = transcript.record(self.current.messages(), self.max_msg_len) {
                tracing::warn!("Failed to record messages: {}", e);
            }
        }
        Ok(self.broadcast())
    }

    /// Flush and release the transcript, if any
    pub fn close(&mut self) -> Result<()> {
        match self.transcript.as_mut() {
            Some(transcript) => transcript.close(),
            None => Ok(()),
        }
    }

    fn broadcast(&self) -> Vec<JointMessage> {
        vec![self.current.clone(); self.n_agents]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel(n_agents: usize, max_msg_len: usize) -> CommunicationChannel {
        let config = CommConfig {
            max_msg_len,
            vocab_size: 5,
            ..Default::default()
        };
        CommunicationChannel::new(&config, n_agents).unwrap()
    }

    fn msgs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_reset_returns_empty_messages() {
        let mut ch = channel(3, 4);
        ch.step(&msgs(&["ab", "c", ""])).unwrap();

        let out = ch.reset();
        assert_eq!(out, vec![JointMessage::empty(3); 3]);
        assert!(ch.history().is_empty());
    }

    #[test]
    fn test_short_messages_pass_through() {
        let mut ch = channel(2, 4);
        ch.reset();

        let out = ch.step(&msgs(&["abc", "d"])).unwrap();
        assert_eq!(out.len(), 2);
        for joint in &out {
            assert_eq!(joint.messages(), &["abc".to_string(), "d".to_string()]);
            assert_eq!(joint.joined(), "abcd");
        }
    }

    #[test]
    fn test_long_messages_truncated() {
        let mut ch = channel(2, 3);
        ch.reset();

        let out = ch.step(&msgs(&["abcdee", "eeee"])).unwrap();
        assert_eq!(out[0].messages(), &["abc".to_string(), "eee".to_string()]);
        assert_eq!(ch.current(), &out[1]);
    }

    #[test]
    fn test_history_grows_by_previous_message() {
        let mut ch = channel(2, 3);
        ch.reset();

        ch.step(&msgs(&["a", "b"])).unwrap();
        ch.step(&msgs(&["c", "d"])).unwrap();
        ch.step(&msgs(&["e", "a"])).unwrap();

        assert_eq!(ch.history().len(), 3);
        assert_eq!(ch.history()[0], JointMessage::empty(2));
        assert_eq!(ch.history()[2], JointMessage(msgs(&["c", "d"])));
    }

    #[test]
    fn test_wrong_message_count() {
        let mut ch = channel(2, 3);
        assert!(matches!(
            ch.step(&msgs(&["a"])),
            Err(MarlGridError::InvalidAction(_))
        ));
        assert!(ch.history().is_empty());
    }

    #[test]
    fn test_out_of_vocab_message_rejected() {
        let mut ch = channel(2, 3);
        ch.reset();

        for bad in [["ab", "z"], ["!", ""], ["abcdez", "a"]] {
            assert!(matches!(
                ch.step(&msgs(&bad)),
                Err(MarlGridError::InvalidAction(_))
            ));
        }
        assert!(ch.history().is_empty());
        assert_eq!(ch.current(), &JointMessage::empty(2));
        assert!(ch.validate_message(0, "edcba").is_ok());
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn test_failed_transcript_write_keeps_stepping() {
        let full = std::path::Path::new("/dev/full");
        if !full.exists() {
            return;
        }
        let config = CommConfig {
            max_msg_len: 2,
            vocab_size: 3,
            text_save_file: Some(full.to_path_buf()),
            ..Default::default()
        };
        let mut ch = CommunicationChannel::new(&config, 2).unwrap();
        ch.reset();

        let out = ch.step(&msgs(&["ab", "c"])).unwrap();
        assert_eq!(out[0].joined(), "abc");
        assert_eq!(ch.history().len(), 1);
    }

    #[test]
    fn test_oversized_vocab_rejected() {
        let config = CommConfig {
            vocab_size: 30,
            ..Default::default()
        };
        assert!(matches!(
            CommunicationChannel::new(&config, 2),
            Err(MarlGridError::Config(_))
        ));
    }

    #[test]
    fn test_space_bounds() {
        let ch = channel(3, 4);
        assert_eq!(ch.action_space().shape(), vec![4]);
        assert_eq!(ch.observation_space().shape(), vec![12]);
    }

    #[test]
    fn test_transcript_written_per_step() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.txt");
        let config = CommConfig {
            max_msg_len: 2,
            vocab_size: 4,
            n_agents: Some(2),
            text_save_file: Some(path.clone()),
        };

        let mut ch = CommunicationChannel::new(&config, 2).unwrap();
        ch.reset();
        ch.step(&msgs(&["abc", "d"])).unwrap();
        ch.step(&msgs(&["", "cc"])).unwrap();
        ch.close().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "ab\nd\n\ncc\n");
    }
}
