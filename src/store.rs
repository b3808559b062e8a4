use crate::error::{RamseyError, RfResult};
use crate::graph::adjlist::{parse_adjlist, write_adjlist};
use crate::graph::GraphState;
use crate::scorer::Fitness;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Durable home of graphs and run logs. The search code only ever talks to
/// storage through this trait.
pub trait GraphStore {
    fn contains(&self, id: &str) -> bool;
    fn load_graph(&self, id: &str) -> RfResult<GraphState>;
    fn save_graph(&mut self, id: &str, graph: &GraphState) -> RfResult<()>;
    /// Forgets `id`; missing ids are not an error.
    fn remove_graph(&mut self, id: &str) -> RfResult<()>;
    /// Replaces the `(index, fitness)` table of the current generation.
    fn write_census(&mut self, census: &[(usize, Fitness)]) -> RfResult<()>;
    /// Appends one generation's best fitness to the running log.
    fn append_best(&mut self, fitness: Fitness) -> RfResult<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CensusRow {
    pub index: usize,
    pub fitness: Fitness,
}

pub fn load_graph_file<P: AsRef<Path>>(path: P) -> RfResult<GraphState> {
    let path = path.as_ref();
    debug!("Loading graph from {}", path.display());
    let text = fs::read_to_string(path)?;
    parse_adjlist(&text)
}

pub fn save_graph_file<P: AsRef<Path>>(path: P, graph: &GraphState) -> RfResult<()> {
    let path = path.as_ref();
    debug!("Saving graph to {}", path.display());
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, write_adjlist(graph))?;
    Ok(())
}

/// Run directory layout:
///
/// ```text
/// <root>/graphs/<id>.txt    adjacency lists
/// <root>/cliques.csv        index,fitness of the current generation
/// <root>/fitness_log.txt    best fitness per generation, one per line
/// ```
#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    pub fn open<P: AsRef<Path>>(root: P) -> RfResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(root.join("graphs"))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn graph_path(&self, id: &str) -> PathBuf {
        self.root.join("graphs").join(format!("{}.txt", id))
    }

    pub fn census_path(&self) -> PathBuf {
        self.root.join("cliques.csv")
    }

    pub fn best_log_path(&self) -> PathBuf {
        self.root.join("fitness_log.txt")
    }

    pub fn read_census(&self) -> RfResult<Vec<CensusRow>> {
        let mut rdr = csv::Reader::from_path(self.census_path())?;
        let mut rows = Vec::new();
        for row in rdr.deserialize() {
            rows.push(row?);
        }
        Ok(rows)
    }

    pub fn read_best_log(&self) -> RfResult<Vec<Fitness>> {
        let text = fs::read_to_string(self.best_log_path())?;
        text.lines()
            .enumerate()
            .filter(|(_, l)| !l.trim().is_empty())
            .map(|(i, l)| {
                l.trim().parse().map_err(|_| {
                    RamseyError::Config(format!(
                        "fitness log line {}: '{}' is not an integer",
                        i + 1,
                        l
                    ))
                })
            })
            .collect()
    }
}

impl GraphStore for DirStore {
    fn contains(&self, id: &str) -> bool {
        self.graph_path(id).is_file()
    }

    fn load_graph(&self, id: &str) -> RfResult<GraphState> {
        load_graph_file(self.graph_path(id))
    }

    fn save_graph(&mut self, id: &str, graph: &GraphState) -> RfResult<()> {
        save_graph_file(self.graph_path(id), graph)
    }

    fn remove_graph(&mut self, id: &str) -> RfResult<()> {
        let path = self.graph_path(id);
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!("Removed stale graph {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_census(&mut self, census: &[(usize, Fitness)]) -> RfResult<()> {
        let mut wtr = csv::Writer::from_path(self.census_path())?;
        for &(index, fitness) in census {
            wtr.serialize(CensusRow { index, fitness })?;
        }
        wtr.flush()?;
        Ok(())
    }

    fn append_best(&mut self, fitness: Fitness) -> RfResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.best_log_path())?;
        writeln!(file, "{}", fitness)?;
        Ok(())
    }
}

/// Keeps everything in memory; used for dry runs and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    graphs: HashMap<String, GraphState>,
    census: Vec<(usize, Fitness)>,
    best_log: Vec<Fitness>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn census(&self) -> &[(usize, Fitness)] {
        &self.census
    }

    pub fn best_log(&self) -> &[Fitness] {
        &self.best_log
    }

    pub fn len(&self) -> usize {
        self.graphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }
}

impl GraphStore for MemoryStore {
    fn contains(&self, id: &str) -> bool {
        self.graphs.contains_key(id)
    }

    fn load_graph(&self, id: &str) -> RfResult<GraphState> {
        self.graphs
            .get(id)
            .cloned()
            .ok_or_else(|| RamseyError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no graph stored under '{}'", id),
            )))
    }

    fn save_graph(&mut self, id: &str, graph: &GraphState) -> RfResult<()> {
        self.graphs.insert(id.to_string(), graph.clone());
        Ok(())
    }

    fn remove_graph(&mut self, id: &str) -> RfResult<()> {
        self.graphs.remove(id);
        Ok(())
    }

    fn write_census(&mut self, census: &[(usize, Fitness)]) -> RfResult<()> {
        self.census = census.to_vec();
        Ok(())
    }

    fn append_best(&mut self, fitness: Fitness) -> RfResult<()> {
        self.best_log.push(fitness);
        Ok(())
    }
}
