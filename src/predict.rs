//! MVP prediction.
//!
//! [`Predictor`] is the seam a real model plugs into. The only
//! implementation shipped is [`VoteShareLeader`], a baseline that names the
//! candidate with the largest share of the vote in the target season.

use crate::models::{Dataset, MvpCandidate, Prediction};
use std::cmp::Ordering;

pub trait Predictor {
    fn name(&self) -> &'static str;

    /// Predicted MVP for `year`, or `None` when the dataset cannot say.
    fn predict(&self, dataset: &Dataset, year: u16) -> Option<Prediction>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct VoteShareLeader;

fn by_share(a: &&MvpCandidate, b: &&MvpCandidate) -> Ordering {
    a.share.total_cmp(&b.share).then_with(|| {
        a.points_won
            .unwrap_or_default()
            .total_cmp(&b.points_won.unwrap_or_default())
    })
}

impl Predictor for VoteShareLeader {
    fn name(&self) -> &'static str {
        "vote-share-leader"
    }

    fn predict(&self, dataset: &Dataset, year: u16) -> Option<Prediction> {
        let leader = dataset.season(year)?.mvp.iter().max_by(by_share)?;
        Some(Prediction {
            year,
            player: leader.player.clone(),
            team: leader.team.clone(),
            share: leader.share,
        })
    }
}
