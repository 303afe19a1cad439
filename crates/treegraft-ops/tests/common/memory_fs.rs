//! In-memory filesystem with per-call error injection.

use std::collections::{BTreeMap, HashMap};
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use treegraft_core::{EntryKind, FsOp};
use treegraft_ops::Filesystem;

#[derive(Debug, Clone)]
enum Node {
    Dir(Vec<OsString>),
    File(Vec<u8>),
    Other,
}

#[derive(Debug, Default)]
struct State {
    nodes: BTreeMap<PathBuf, Node>,
    errors: HashMap<(FsOp, PathBuf), io::ErrorKind>,
    calls: Vec<(FsOp, PathBuf)>,
}

/// Filesystem held entirely in memory.
///
/// Directory listings keep insertion order, so traversal order is
/// deterministic. Every call is recorded for later inspection.
#[derive(Debug)]
pub struct MemoryFs {
    state: Mutex<State>,
}

impl Default for MemoryFs {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryFs {
    pub fn new() -> Self {
        let mut state = State::default();
        state.nodes.insert(PathBuf::from("/"), Node::Dir(Vec::new()));
        Self {
            state: Mutex::new(state),
        }
    }

    /// Add a directory, creating missing ancestors.
    pub fn add_dir(&self, path: impl AsRef<Path>) -> &Self {
        self.insert(path.as_ref(), Node::Dir(Vec::new()));
        self
    }

    /// Add a regular file, creating missing ancestors.
    pub fn add_file(&self, path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> &Self {
        self.insert(path.as_ref(), Node::File(contents.as_ref().to_vec()));
        self
    }

    /// Add something that is neither file nor directory, e.g. a symlink.
    pub fn add_other(&self, path: impl AsRef<Path>) -> &Self {
        self.insert(path.as_ref(), Node::Other);
        self
    }

    /// Make `op` on `path` fail with `kind`.
    pub fn fail(&self, op: FsOp, path: impl AsRef<Path>, kind: io::ErrorKind) -> &Self {
        let mut state = self.state.lock().unwrap();
        state.errors.insert((op, path.as_ref().to_path_buf()), kind);
        self
    }

    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        self.state.lock().unwrap().nodes.contains_key(path.as_ref())
    }

    pub fn kind(&self, path: impl AsRef<Path>) -> Option<EntryKind> {
        let state = self.state.lock().unwrap();
        state.nodes.get(path.as_ref()).map(Node::kind)
    }

    pub fn contents(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        match self.state.lock().unwrap().nodes.get(path.as_ref()) {
            Some(Node::File(data)) => Some(data.clone()),
            _ => None,
        }
    }

    pub fn children(&self, path: impl AsRef<Path>) -> Vec<OsString> {
        match self.state.lock().unwrap().nodes.get(path.as_ref()) {
            Some(Node::Dir(names)) => names.clone(),
            _ => Vec::new(),
        }
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<(FsOp, PathBuf)> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Calls that changed (or tried to change) the tree.
    pub fn mutations(&self) -> Vec<(FsOp, PathBuf)> {
        self.calls()
            .into_iter()
            .filter(|(op, _)| !matches!(op, FsOp::Stat | FsOp::ListDir))
            .collect()
    }

    fn insert(&self, path: &Path, node: Node) {
        let mut state = self.state.lock().unwrap();
        let mut ancestors: Vec<&Path> = path.ancestors().skip(1).collect();
        ancestors.reverse();
        for dir in ancestors {
            if !state.nodes.contains_key(dir) {
                link(&mut state, dir);
                state.nodes.insert(dir.to_path_buf(), Node::Dir(Vec::new()));
            }
        }
        if state.nodes.insert(path.to_path_buf(), node).is_none() {
            link(&mut state, path);
        }
    }

    /// Record a call and return its injected error, if any.
    fn enter(&self, op: FsOp, path: &Path) -> io::Result<std::sync::MutexGuard<'_, State>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push((op, path.to_path_buf()));
        let injected = state.errors.get(&(op, path.to_path_buf())).copied();
        match injected {
            Some(kind) => Err(io::Error::new(kind, format!("injected {op} failure"))),
            None => Ok(state),
        }
    }
}

impl Node {
    fn kind(&self) -> EntryKind {
        match self {
            Self::Dir(_) => EntryKind::Directory,
            Self::File(_) => EntryKind::RegularFile,
            Self::Other => EntryKind::Other,
        }
    }
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, format!("no such path {}", path.display()))
}

fn link(state: &mut State, path: &Path) {
    let (Some(parent), Some(name)) = (path.parent(), path.file_name()) else {
        return;
    };
    if let Some(Node::Dir(names)) = state.nodes.get_mut(parent) {
        names.push(name.to_os_string());
    }
}

fn unlink(state: &mut State, path: &Path) {
    let (Some(parent), Some(name)) = (path.parent(), path.file_name()) else {
        return;
    };
    if let Some(Node::Dir(names)) = state.nodes.get_mut(parent) {
        names.retain(|n| n != name);
    }
}

fn parent_is_dir(state: &State, path: &Path) -> bool {
    path.parent()
        .is_some_and(|p| matches!(state.nodes.get(p), Some(Node::Dir(_))))
}

impl Filesystem for MemoryFs {
    async fn entry_kind(&self, path: &Path) -> io::Result<EntryKind> {
        let state = self.enter(FsOp::Stat, path)?;
        state
            .nodes
            .get(path)
            .map(Node::kind)
            .ok_or_else(|| not_found(path))
    }

    async fn list_dir(&self, path: &Path) -> io::Result<Vec<OsString>> {
        let state = self.enter(FsOp::ListDir, path)?;
        match state.nodes.get(path) {
            Some(Node::Dir(names)) => Ok(names.clone()),
            Some(_) => Err(io::Error::from(io::ErrorKind::NotADirectory)),
            None => Err(not_found(path)),
        }
    }

    async fn create_dir(&self, path: &Path) -> io::Result<()> {
        let mut state = self.enter(FsOp::CreateDir, path)?;
        if state.nodes.contains_key(path) {
            return Err(io::Error::from(io::ErrorKind::AlreadyExists));
        }
        if !parent_is_dir(&state, path) {
            return Err(not_found(path));
        }
        state.nodes.insert(path.to_path_buf(), Node::Dir(Vec::new()));
        link(&mut state, path);
        Ok(())
    }

    async fn copy_file_exclusive(&self, source: &Path, destination: &Path) -> io::Result<u64> {
        let mut state = self.enter(FsOp::CopyFile, source)?;
        let data = match state.nodes.get(source) {
            Some(Node::File(data)) => data.clone(),
            Some(_) => return Err(io::Error::from(io::ErrorKind::InvalidInput)),
            None => return Err(not_found(source)),
        };
        if state.nodes.contains_key(destination) {
            return Err(io::Error::from(io::ErrorKind::AlreadyExists));
        }
        if !parent_is_dir(&state, destination) {
            return Err(not_found(destination));
        }
        let len = data.len() as u64;
        state.nodes.insert(destination.to_path_buf(), Node::File(data));
        link(&mut state, destination);
        Ok(len)
    }

    async fn remove_file(&self, path: &Path) -> io::Result<()> {
        let mut state = self.enter(FsOp::RemoveFile, path)?;
        match state.nodes.get(path).map(Node::kind) {
            Some(EntryKind::Directory) => Err(io::Error::from(io::ErrorKind::IsADirectory)),
            Some(_) => {
                state.nodes.remove(path);
                unlink(&mut state, path);
                Ok(())
            }
            None => Err(not_found(path)),
        }
    }

    async fn remove_dir(&self, path: &Path) -> io::Result<()> {
        let mut state = self.enter(FsOp::RemoveDir, path)?;
        match state.nodes.get(path) {
            Some(Node::Dir(names)) if names.is_empty() => {}
            Some(Node::Dir(_)) => return Err(io::Error::from(io::ErrorKind::DirectoryNotEmpty)),
            Some(_) => return Err(io::Error::from(io::ErrorKind::NotADirectory)),
            None => return Err(not_found(path)),
        }
        state.nodes.remove(path);
        unlink(&mut state, path);
        Ok(())
    }
}
