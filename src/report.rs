use crate::*;

/// Share of a block that reached a given tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tally {
    pub rank: Rank,
    /// Percent of episodes whose largest tile was at least this rank.
    pub win: f64,
    /// Percent of episodes whose largest tile was exactly this rank.
    pub terminal: f64,
}

/// Aggregates over the most recent block of episodes.
///
/// ```text
/// 1000   avg = 273901, max = 382324, ops = 241563 (170543|896715)
///        2048    99.5%   (1.1%)
///        4096    98.4%   (4.7%)
/// ```
///
/// `ops` is moves per second overall, then for the player and the
/// environment. Each tile row gives the win rate and terminal rate of
/// that tile.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub count: usize,
    pub block: usize,
    pub average: f64,
    pub maximum: Score,
    pub ops: u64,
    pub player_ops: u64,
    pub environment_ops: u64,
    pub tiles: Vec<Tally>,
}

impl Report {
    /// Summarize `episodes`, the most recent block of a run of `count`.
    pub fn new<'a, I>(count: usize, episodes: I) -> Self
    where
        I: IntoIterator<Item = &'a Episode>,
    {
        let mut block = 0usize;
        let mut ranks = [0usize; 64];
        let (mut sum, mut max): (Score, Score) = (0, 0);
        let (mut sop, mut pop, mut eop) = (0, 0, 0);
        let (mut sdu, mut pdu, mut edu) = (0, 0, 0);
        for episode in episodes {
            block += 1;
            sum += episode.score();
            max = max.max(episode.score());
            ranks[episode.board().max_rank() as usize % 64] += 1;
            sop += episode.step();
            pop += episode.step_by(Role::Player);
            eop += episode.step_by(Role::Environment);
            sdu += episode.time();
            pdu += episode.time_by(Role::Player);
            edu += episode.time_by(Role::Environment);
        }
        Self {
            count,
            block,
            average: sum as f64 / block.max(1) as f64,
            maximum: max,
            ops: Self::speed(sop, sdu),
            player_ops: Self::speed(pop, pdu),
            environment_ops: Self::speed(eop, edu),
            tiles: Self::tally(&ranks, block),
        }
    }

    /// Moves per second, flooring the duration at one millisecond.
    fn speed(moves: usize, millis: Millis) -> u64 {
        moves as u64 * 1000 / millis.max(1)
    }

    /// Win and terminal rates for each observed rank, in increasing order,
    /// until every episode of the block is accounted for.
    fn tally(ranks: &[usize], block: usize) -> Vec<Tally> {
        let mut tiles = Vec::new();
        let mut seen = 0;
        for (rank, &n) in ranks.iter().enumerate() {
            if seen >= block {
                break;
            }
            if n == 0 {
                continue;
            }
            let reached = ranks[rank..].iter().sum::<usize>();
            tiles.push(Tally {
                rank: rank as Rank,
                win: reached as f64 * 100. / block as f64,
                terminal: n as f64 * 100. / block as f64,
            });
            seen += n;
        }
        tiles
    }

    pub fn tally_of(&self, rank: Rank) -> Option<&Tally> {
        self.tiles.iter().find(|t| t.rank == rank)
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}\tavg = {}, max = {}, ops = {} ({}|{})",
            self.count,
            self.average as u64,
            self.maximum,
            self.ops,
            self.player_ops,
            self.environment_ops,
        )?;
        for tally in self.tiles.iter() {
            write!(
                f,
                "\n\t{}\t{}%\t({}%)",
                value(tally.rank),
                tally.win,
                tally.terminal
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rates_for_two_ranks() {
        let mut ranks = [0usize; 64];
        ranks[10] = 1;
        ranks[11] = 1;
        let tiles = Report::tally(&ranks, 2);
        assert_eq!(tiles.len(), 2);
        assert_eq!(tiles[0].rank, 10);
        assert_eq!(tiles[0].win, 100.);
        assert_eq!(tiles[0].terminal, 50.);
        assert_eq!(tiles[1].rank, 11);
        assert_eq!(tiles[1].win, 50.);
        assert_eq!(tiles[1].terminal, 50.);
    }

    #[test]
    fn stops_once_block_is_covered() {
        let mut ranks = [0usize; 64];
        ranks[3] = 4;
        let tiles = Report::tally(&ranks, 4);
        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0].win, 100.);
        assert_eq!(tiles[0].terminal, 100.);
    }

    #[test]
    fn aggregates_scores_and_speed() {
        let episodes = ["p:e@0|01#R|e@1000", "p:e@0|01#R01#R[4]|e@2000"]
            .iter()
            .map(|line| line.parse::<Episode>().unwrap())
            .collect::<Vec<_>>();
        let report = Report::new(7, episodes.iter());
        assert_eq!(report.count, 7);
        assert_eq!(report.block, 2);
        assert_eq!(report.average, 2.);
        assert_eq!(report.maximum, 4);
        assert_eq!(report.ops, 2);
        assert_eq!(report.player_ops, 3000);
        assert_eq!(report.tally_of(1).map(|t| t.win), Some(100.));
        assert_eq!(report.tally_of(2).map(|t| t.terminal), Some(50.));
        assert_eq!(report.tally_of(3), None);
    }

    #[test]
    fn renders_header_and_tiles() {
        let episode = "p:e@0|01#R01#R[4]|e@2000".parse::<Episode>().unwrap();
        let text = Report::new(1, [&episode]).to_string();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("1\tavg = 4, max = 4, ops = 2 (2000|2000)"));
        assert_eq!(lines.next(), Some("\t4\t100%\t(100%)"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn empty_block_is_quiet() {
        let report = Report::new(0, std::iter::empty());
        assert_eq!(report.block, 0);
        assert_eq!(report.average, 0.);
        assert!(report.tiles.is_empty());
    }
}
