use std::collections::HashMap;
use std::sync::Mutex;

use crate::location::ProfileLocation;

/// Interns [`ProfileLocation`]s into small `u32` ids so [`crate::record::ProfileRecord`]
/// can stay a fixed-size `Copy` value instead of carrying a string-bearing
/// location inline.
pub struct LocationRegistry {
    ids: Mutex<HashMap<String, u32>>,
    locations: Mutex<Vec<ProfileLocation>>,
}

impl LocationRegistry {
    pub fn new() -> Self {
        Self {
            ids: Mutex::new(HashMap::new()),
            locations: Mutex::new(Vec::new()),
        }
    }

    /// Returns the id for `location`, interning it on first sight. Safe to
    /// call concurrently from any thread with a section open.
    pub fn intern(&self, location: ProfileLocation) -> u32 {
        let key = location.id();
        if let Some(&id) = self.ids.lock().unwrap().get(&key) {
            return id;
        }

        let mut ids = self.ids.lock().unwrap();
        if let Some(&id) = ids.get(&key) {
            return id;
        }
        let mut locations = self.locations.lock().unwrap();
        let id = locations.len() as u32;
        locations.push(location);
        ids.insert(key, id);
        id
    }

    pub fn get(&self, id: u32) -> ProfileLocation {
        self.locations.lock().unwrap()[id as usize].clone()
    }

    pub fn len(&self) -> usize {
        self.locations.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for LocationRegistry {
    fn default() -> Self {
        Self::new()
    }
}
