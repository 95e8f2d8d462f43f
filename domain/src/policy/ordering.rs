//! Speaking order policy

use crate::consensus::vote::ConsensusPoll;
use crate::debate::participant::Participant;

/// Speaking order: dissenters, then supporters, then everyone else.
///
/// A stable partition on [`StanceCategory::speaking_rank`]; participants in
/// the same bucket keep their registration order.
///
/// [`StanceCategory::speaking_rank`]: crate::debate::participant::StanceCategory::speaking_rank
pub fn speaking_order(participants: &[Participant]) -> Vec<&Participant> {
    let mut order: Vec<&Participant> = participants.iter().collect();
    // sort_by_key is stable
    order.sort_by_key(|p| p.stance.speaking_rank());
    order
}

/// Move participants who voted "not ready" ahead of those who voted ready.
///
/// Stable with respect to `order`. Participants missing from the poll are
/// treated as not ready.
pub fn dissenters_first<'a>(order: &[&'a Participant], poll: &ConsensusPoll) -> Vec<&'a Participant> {
    let (ready, not_ready): (Vec<&Participant>, Vec<&Participant>) =
        order.iter().copied().partition(|p| poll.is_ready(p.id));
    not_ready.into_iter().chain(ready).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consensus::vote::ConsensusVote;
    use crate::core::backend::BackendId;
    use crate::debate::participant::{ParticipantId, StanceCategory};

    fn p(i: usize, title: &str, stance: StanceCategory) -> Participant {
        Participant::new(
            ParticipantId::new(i),
            title,
            "position",
            BackendId::new("claude").unwrap(),
        )
        .with_stance(stance)
    }

    fn titles<'a>(order: &[&'a Participant]) -> Vec<&'a str> {
        order.iter().map(|p| p.title.as_str()).collect()
    }

    #[test]
    fn test_stable_three_bucket_order() {
        use StanceCategory::*;
        let participants = vec![
            p(0, "D1", Disagree),
            p(1, "A1", Agree),
            p(2, "N1", NeutralOrOther),
            p(3, "D2", Disagree),
            p(4, "A2", Agree),
        ];
        let order = speaking_order(&participants);
        assert_eq!(titles(&order), vec!["D1", "D2", "A1", "A2", "N1"]);
    }

    #[test]
    fn test_single_bucket_keeps_registration_order() {
        let participants = vec![
            p(0, "X", StanceCategory::NeutralOrOther),
            p(1, "Y", StanceCategory::NeutralOrOther),
            p(2, "Z", StanceCategory::NeutralOrOther),
        ];
        assert_eq!(titles(&speaking_order(&participants)), vec!["X", "Y", "Z"]);
    }

    #[test]
    fn test_dissenters_first() {
        use StanceCategory::*;
        let participants = vec![
            p(0, "D1", Disagree),
            p(1, "A1", Agree),
            p(2, "A2", Agree),
        ];
        let order = speaking_order(&participants);
        let poll = ConsensusPoll::new(
            2,
            vec![
                ConsensusVote::new(2, ParticipantId::new(0), true, "YES"),
                ConsensusVote::new(2, ParticipantId::new(1), true, "YES"),
                ConsensusVote::new(2, ParticipantId::new(2), false, "NO"),
            ],
        );
        let next = dissenters_first(&order, &poll);
        assert_eq!(titles(&next), vec!["A2", "D1", "A1"]);
    }
}
