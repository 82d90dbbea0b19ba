use crate::*;
use anyhow::Context;
use std::collections::VecDeque;

/// A run of episodes: how many to play, and what to remember of them.
///
/// `total` episodes are played. Only the last `limit` are retained, and
/// every `block` episodes a [`Report`] over the latest block is produced.
/// `count` keeps counting after old episodes have been evicted, so it is
/// never smaller than the retained history.
#[derive(Debug, Clone)]
pub struct Statistic {
    total: usize,
    block: usize,
    limit: usize,
    count: usize,
    data: VecDeque<Episode>,
}

impl Statistic {
    /// A zero `block` or `limit` falls back to `total`.
    pub fn new(total: usize, block: usize, limit: usize) -> Self {
        let block = if block > 0 { block } else { total };
        let limit = if limit > 0 { limit } else { total };
        Self {
            total,
            block,
            limit,
            count: 0,
            data: VecDeque::with_capacity(limit.min(1 << 16)),
        }
    }
    pub fn total(&self) -> usize {
        self.total
    }
    pub fn block(&self) -> usize {
        self.block
    }
    pub fn limit(&self) -> usize {
        self.limit
    }
    /// Episodes started so far, including evicted ones.
    pub fn count(&self) -> usize {
        self.count
    }
    /// Episodes currently retained.
    pub fn len(&self) -> usize {
        self.data.len()
    }
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
    pub fn is_finished(&self) -> bool {
        self.count >= self.total
    }
    pub fn episodes(&self) -> impl Iterator<Item = &Episode> {
        self.data.iter()
    }
    pub fn at(&self, i: usize) -> Option<&Episode> {
        self.data.get(i)
    }
    pub fn front(&self) -> Option<&Episode> {
        self.data.front()
    }
    pub fn back(&self) -> Option<&Episode> {
        self.data.back()
    }
    pub fn back_mut(&mut self) -> Option<&mut Episode> {
        self.data.back_mut()
    }

    /// Start a new episode, evicting the oldest one once `limit` is reached.
    pub fn open_episode(&mut self, tag: &str) -> &mut Episode {
        if self.count >= self.limit {
            self.data.pop_front();
        }
        self.count += 1;
        let mut episode = Episode::new();
        episode.open_episode(tag);
        self.data.push_back(episode);
        let last = self.data.len() - 1;
        &mut self.data[last]
    }

    /// Close the latest episode. Every `block` episodes, report on the
    /// latest block and return the report.
    pub fn close_episode(&mut self, tag: &str) -> Option<Report> {
        match self.data.back_mut() {
            Some(episode) => episode.close_episode(tag),
            None => {
                log::warn!("no open episode to close ({})", tag);
                return None;
            }
        }
        if self.count % self.block.max(1) == 0 {
            let report = self.show();
            log::info!("{}", report);
            Some(report)
        } else {
            None
        }
    }

    /// Report over the latest `block` retained episodes.
    pub fn show(&self) -> Report {
        self.report(self.block)
    }
    /// Report over every retained episode.
    pub fn summary(&self) -> Report {
        self.report(self.data.len())
    }
    fn report(&self, block: usize) -> Report {
        let skip = self.data.len().saturating_sub(block);
        Report::new(self.count, self.data.iter().skip(skip))
    }

    //
    /// Replace the retained history with the episodes serialized in `text`,
    /// one per line. Blank lines are skipped. On failure nothing changes.
    pub fn load(&mut self, text: &str) -> anyhow::Result<()> {
        let data = text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                line.parse::<Episode>()
                    .with_context(|| format!("episode on line {}", i + 1))
            })
            .collect::<anyhow::Result<VecDeque<_>>>()?;
        self.total = self.total.max(data.len());
        self.limit = self.limit.max(data.len());
        self.count = data.len();
        self.data = data;
        Ok(())
    }
    pub fn load_from(&mut self, path: &std::path::Path) -> anyhow::Result<()> {
        log::info!("{:<32}{}", "loading statistic", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read statistic file {}", path.display()))?;
        self.load(&text)
            .with_context(|| format!("parse statistic file {}", path.display()))
    }
    pub fn save_to(&self, path: &std::path::Path) -> anyhow::Result<()> {
        log::info!("{:<32}{}", "saving statistic", path.display());
        std::fs::write(path, self.to_string())
            .with_context(|| format!("write statistic file {}", path.display()))
    }
}

impl std::fmt::Display for Statistic {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (i, episode) in self.data.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", episode)?;
        }
        writeln!(f)
    }
}
