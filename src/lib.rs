use std::cmp::max;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::sync::RwLock;

use log::debug;
use serde::Serialize;

pub mod fingerprint;
pub mod tagger;
pub mod types;
pub mod word;

pub use crate::fingerprint::*;
pub use crate::tagger::*;
pub use crate::types::*;
pub use crate::word::*;

///Aggregate statistics over the stored words, computed over the
///deduplicated set of normalized forms. Field names double as the keys of
///the serialized stats payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub count: usize,
    pub min: usize,
    pub max: usize,
    pub median: usize,
    pub average: usize,
}

///The authoritative fingerprint map plus the views memoized from it. All
///of it sits behind one lock in [`AnagramIndex`]: mutations and view
///rebuilds need exclusive access, reads that find a valid view do not.
#[derive(Default)]
struct IndexState {
    ///Maps a fingerprint to its anagram class. Buckets have set
    ///semantics over the (normalized, raw) pairing and are never left
    ///empty behind.
    buckets: HashMap<Fingerprint, Vec<Word>>,

    ///All distinct normalized forms, flattened out of the buckets
    flat: Option<HashSet<String>>,

    ///The flat set ordered by word length, shortest first
    sorted_words: Option<Vec<String>>,

    ///Class contents ordered by class size, smallest first; the
    ///fingerprint value breaks ties so the order is total
    sorted_groups: Option<Vec<(Fingerprint, WordGroup)>>,
}

impl IndexState {
    ///Drop the memoized views. Every mutation must call this so that no
    ///read can observe a view from before the mutation.
    fn clear_memoized(&mut self) {
        self.flat = None;
        self.sorted_words = None;
        self.sorted_groups = None;
    }

    fn flat(&mut self) -> &HashSet<String> {
        if self.flat.is_none() {
            debug!("rebuilding flattened word set");
            let mut flat = HashSet::new();
            for members in self.buckets.values() {
                flat.extend(members.iter().map(|word| word.normalized.clone()));
            }
            self.flat = Some(flat);
        }
        self.flat.as_ref().expect("flat view was just built")
    }

    fn sorted_words(&mut self) -> &[String] {
        if self.sorted_words.is_none() {
            let mut sorted: Vec<String> = self.flat().iter().cloned().collect();
            sorted.sort_by_key(|word| word.len());
            self.sorted_words = Some(sorted);
        }
        self.sorted_words
            .as_deref()
            .expect("length ordering was just built")
    }

    fn sorted_groups(&mut self) -> &[(Fingerprint, WordGroup)] {
        if self.sorted_groups.is_none() {
            debug!("rebuilding group size ordering");
            let mut groups: Vec<(Fingerprint, WordGroup)> = self
                .buckets
                .iter()
                .map(|(fingerprint, members)| {
                    let raws = members.iter().map(|word| word.raw.clone()).collect();
                    (fingerprint.clone(), raws)
                })
                .collect();
            groups.sort_by(|a, b| a.1.len().cmp(&b.1.len()).then_with(|| a.0.cmp(&b.0)));
            self.sorted_groups = Some(groups);
        }
        self.sorted_groups
            .as_deref()
            .expect("group ordering was just built")
    }
}

///The in-memory anagram index. Owns the map from fingerprints to anagram
///classes and the statistics memoized over it. One instance is meant to
///live for the whole process, shared by reference (or `Arc`) between
///whatever serves the queries; every operation takes `&self` and
///serializes internally.
///
/// # Examples
///
/// ```
/// # use anadict::*;
/// let index = AnagramIndex::new();
/// index.insert(Word::new("read"));
/// index.insert(Word::new("dear"));
/// let anagrams = index.find(&Word::new("dare"), None, true);
/// assert_eq!(anagrams.len(), 2);
/// ```
#[derive(Default)]
pub struct AnagramIndex {
    state: RwLock<IndexState>,
}

impl AnagramIndex {
    pub fn new() -> AnagramIndex {
        AnagramIndex {
            state: RwLock::new(IndexState::default()),
        }
    }

    ///Add a word to its anagram class, creating the class if this is its
    ///first member. Re-inserting a spelling that is already present
    ///leaves the class unchanged.
    pub fn insert(&self, word: Word) {
        let mut state = self.state.write().expect("index lock poisoned");
        let fingerprint = word.fingerprint().clone();
        debug!("insert '{}' (normalized '{}')", word.raw, word.normalized);
        let members = state.buckets.entry(fingerprint).or_insert_with(Vec::new);
        if !members.contains(&word) {
            members.push(word);
        }
        state.clear_memoized();
    }

    ///Remove one spelling from its anagram class, matching on raw
    ///equality. Returns false when no such spelling is stored; absence is
    ///not an error. A class emptied by the removal is dropped from the map.
    pub fn remove_word(&self, word: &Word) -> bool {
        let mut state = self.state.write().expect("index lock poisoned");
        let removed = if let Some(members) = state.buckets.get_mut(word.fingerprint()) {
            let before = members.len();
            members.retain(|member| member.raw != word.raw);
            before != members.len()
        } else {
            false
        };
        if removed {
            debug!("removed '{}'", word.raw);
            if state
                .buckets
                .get(word.fingerprint())
                .map_or(false, |members| members.is_empty())
            {
                state.buckets.remove(word.fingerprint());
            }
            state.clear_memoized();
        }
        removed
    }

    ///Delete a word's entire anagram class. Returns true iff a class
    ///existed at that fingerprint.
    pub fn remove_group(&self, word: &Word) -> bool {
        let mut state = self.state.write().expect("index lock poisoned");
        match state.buckets.remove(word.fingerprint()) {
            Some(members) => {
                debug!("removed the {}-member class of '{}'", members.len(), word.raw);
                state.clear_memoized();
                true
            }
            None => false,
        }
    }

    ///Remove all words. Safe to call repeatedly on an already-empty index.
    pub fn clear(&self) {
        let mut state = self.state.write().expect("index lock poisoned");
        state.buckets.clear();
        state.clear_memoized();
    }

    ///All stored anagrams of the given word, as raw spellings. The
    ///querying word's own raw spelling is excluded. `limit` truncates the
    ///result, `include_proper_nouns = false` filters classified proper
    ///nouns out first. Enumeration order carries no meaning.
    pub fn find(
        &self,
        word: &Word,
        limit: Option<usize>,
        include_proper_nouns: bool,
    ) -> Vec<String> {
        let state = self.state.read().expect("index lock poisoned");
        let members = match state.buckets.get(word.fingerprint()) {
            Some(members) => members,
            None => return Vec::new(),
        };
        let mut results: Vec<String> = members
            .iter()
            .filter(|member| include_proper_nouns || !member.is_proper_noun())
            .map(|member| member.raw.clone())
            .filter(|raw| raw != &word.raw)
            .collect();
        if let Some(limit) = limit {
            results.truncate(limit);
        }
        results
    }

    ///True iff every given word shares a single fingerprint. The empty
    ///list has zero distinct fingerprints, not one, and is therefore not
    ///an anagram set.
    pub fn are_anagrams(words: &[&str]) -> bool {
        let fingerprints: HashSet<Fingerprint> =
            words.iter().map(|text| text.fingerprint()).collect();
        fingerprints.len() == 1
    }

    ///The raw spellings of every anagram class with exactly `size` members
    pub fn groups_with_size(&self, size: usize) -> Vec<WordGroup> {
        let state = self.state.read().expect("index lock poisoned");
        state
            .buckets
            .values()
            .filter(|members| members.len() == size)
            .map(|members| members.iter().map(|word| word.raw.clone()).collect())
            .collect()
    }

    ///The raw spellings of the largest anagram class, or an empty list
    ///when the index holds nothing. Ties break towards the greater
    ///fingerprint value.
    pub fn largest_group(&self) -> WordGroup {
        self.read_view(
            |state| {
                state
                    .sorted_groups
                    .as_deref()
                    .map(|groups| groups.last().map(|(_, group)| group.clone()).unwrap_or_default())
            },
            |state| {
                state
                    .sorted_groups()
                    .last()
                    .map(|(_, group)| group.clone())
                    .unwrap_or_default()
            },
        )
    }

    ///The raw spellings of the smallest anagram class, or an empty list
    ///when the index holds nothing. Ties break towards the lesser
    ///fingerprint value.
    pub fn smallest_group(&self) -> WordGroup {
        self.read_view(
            |state| {
                state
                    .sorted_groups
                    .as_deref()
                    .map(|groups| groups.first().map(|(_, group)| group.clone()).unwrap_or_default())
            },
            |state| {
                state
                    .sorted_groups()
                    .first()
                    .map(|(_, group)| group.clone())
                    .unwrap_or_default()
            },
        )
    }

    ///The number of distinct normalized words stored
    pub fn word_count(&self) -> usize {
        self.read_view(
            |state| state.flat.as_ref().map(HashSet::len),
            |state| state.flat().len(),
        )
    }

    ///The length of the shortest stored word, 0 when the index is empty
    pub fn shortest_word_length(&self) -> usize {
        self.read_view(
            |state| {
                state
                    .sorted_words
                    .as_deref()
                    .map(|sorted| sorted.first().map_or(0, String::len))
            },
            |state| state.sorted_words().first().map_or(0, String::len),
        )
    }

    ///The length of the longest stored word, 0 when the index is empty
    pub fn longest_word_length(&self) -> usize {
        self.read_view(
            |state| {
                state
                    .sorted_words
                    .as_deref()
                    .map(|sorted| sorted.last().map_or(0, String::len))
            },
            |state| state.sorted_words().last().map_or(0, String::len),
        )
    }

    ///The length of the word at the median probe position: the
    ///length-ordered word list indexed at half the number of anagram
    ///classes (not half the word count), 0 when that position is out of
    ///range. The class-derived probe is deliberate, kept as-is from the
    ///original service this index reimplements.
    pub fn median_word_length(&self) -> usize {
        self.read_view(
            |state| {
                let middle = state.buckets.len() / 2;
                state
                    .sorted_words
                    .as_deref()
                    .map(|sorted| sorted.get(middle).map_or(0, String::len))
            },
            |state| {
                let middle = state.buckets.len() / 2;
                state.sorted_words().get(middle).map_or(0, String::len)
            },
        )
    }

    ///The mean stored word length, integer-truncated; 0 when the index is
    ///empty (the denominator is floored to 1)
    pub fn average_word_length(&self) -> usize {
        fn average(flat: &HashSet<String>) -> usize {
            let total: usize = flat.iter().map(String::len).sum();
            total / max(flat.len(), 1)
        }
        self.read_view(
            |state| state.flat.as_ref().map(average),
            |state| average(state.flat()),
        )
    }

    ///All five aggregate statistics in one value
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            count: self.word_count(),
            min: self.shortest_word_length(),
            max: self.longest_word_length(),
            median: self.median_word_length(),
            average: self.average_word_length(),
        }
    }

    ///Load a newline-delimited lexicon file, taking the word from the
    ///first tab-separated column of each non-empty line. Returns the
    ///number of words read.
    pub fn read_lexicon(&self, filename: &str) -> Result<usize, std::io::Error> {
        debug!("reading lexicon from {}...", filename);
        let f = File::open(filename)?;
        let f_buffer = BufReader::new(f);
        let mut count = 0;
        for line in f_buffer.lines() {
            let line = line?;
            if !line.is_empty() {
                if let Some(text) = line.split('\t').next() {
                    self.insert(Word::new(text));
                    count += 1;
                }
            }
        }
        debug!(" - read lexicon of {} words", count);
        Ok(count)
    }

    ///Serve a read: take the shared lock and answer from the memoized
    ///view when it is valid, otherwise take the exclusive lock and
    ///rebuild. Two callers can not race a rebuild into inconsistent
    ///cache state, the second one finds the view already valid.
    fn read_view<T>(
        &self,
        cached: impl FnOnce(&IndexState) -> Option<T>,
        rebuild: impl FnOnce(&mut IndexState) -> T,
    ) -> T {
        {
            let state = self.state.read().expect("index lock poisoned");
            if let Some(result) = cached(&state) {
                return result;
            }
        }
        let mut state = self.state.write().expect("index lock poisoned");
        rebuild(&mut state)
    }
}
