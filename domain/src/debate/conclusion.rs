//! Conclusion of a debate session

use crate::debate::participant::ParticipantId;
use crate::debate::transcript::Transcript;
use serde::Serialize;
use std::collections::BTreeMap;

/// Integrated conclusion plus every participant's closing proposal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conclusion {
    pub synthesized_text: String,
    pub proposals: BTreeMap<ParticipantId, String>,
}

impl Conclusion {
    pub fn new(synthesized_text: impl Into<String>, proposals: BTreeMap<ParticipantId, String>) -> Self {
        Self {
            synthesized_text: synthesized_text.into(),
            proposals,
        }
    }

    /// Collect the closing proposals of a transcript, keyed by speaker
    pub fn proposals_from(transcript: &Transcript) -> BTreeMap<ParticipantId, String> {
        transcript
            .closing()
            .map(|u| (u.speaker, u.content.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debate::round::Round;
    use crate::debate::timestamp::SessionTimestamp;
    use crate::debate::transcript::Utterance;

    #[test]
    fn test_proposals_from_closing_round_only() {
        let mut t = Transcript::new(SessionTimestamp::now());
        t.push(Utterance::new(Round::opening(), ParticipantId::new(0), "open"));
        t.push(Utterance::new(Round::closing(2), ParticipantId::new(1), "B final"));
        t.push(Utterance::new(Round::closing(2), ParticipantId::new(0), "A final"));

        let proposals = Conclusion::proposals_from(&t);
        assert_eq!(proposals.len(), 2);
        assert_eq!(proposals[&ParticipantId::new(0)], "A final");
        // keyed by registration order regardless of speaking order
        let keys: Vec<_> = proposals.keys().map(|k| k.index()).collect();
        assert_eq!(keys, vec![0, 1]);
    }
}
