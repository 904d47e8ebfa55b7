use gloo::storage::{LocalStorage, Storage};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Namespaced `LocalStorage` key for a persisted type.
pub(crate) trait StorageKey {
    const KEY: &'static str;
}

pub(crate) trait LocalOrDefault: Sized {
    fn local_or_default() -> Self;
    fn local_save(&self);
}

impl<T> LocalOrDefault for T
where
    T: StorageKey + Serialize + DeserializeOwned + Default,
{
    fn local_or_default() -> Self {
        LocalStorage::get(T::KEY).unwrap_or_else(|err| {
            log::debug!("no stored {}: {:?}", T::KEY, err);
            T::default()
        })
    }

    fn local_save(&self) {
        if let Err(err) = LocalStorage::set(T::KEY, self) {
            log::error!("Could not save {} to local storage: {:?}", T::KEY, err);
        }
    }
}

/// Seed from JavaScript's Math.random, built from two 32-bit halves.
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    let half = || (random() * f64::from(u32::MAX)) as u64;
    (half() << 32) | half()
}

/// Browser timers take whole milliseconds.
pub(crate) fn timer_millis(duration: core::time::Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::time::Duration;

    #[test]
    fn timer_millis_saturates() {
        assert_eq!(timer_millis(Duration::from_secs(1)), 1000);
        assert_eq!(timer_millis(Duration::from_micros(1500)), 1);
        assert_eq!(timer_millis(Duration::from_secs(u64::MAX)), u32::MAX);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use serde::Deserialize;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Stored {
        value: u8,
    }

    impl StorageKey for Stored {
        const KEY: &'static str = "pairmatch:test:v1";
    }

    #[wasm_bindgen_test]
    fn local_storage_round_trip() {
        LocalStorage::delete(Stored::KEY);
        assert_eq!(Stored::local_or_default(), Stored::default());

        Stored { value: 6 }.local_save();
        assert_eq!(Stored::local_or_default(), Stored { value: 6 });
        LocalStorage::delete(Stored::KEY);
    }

    #[wasm_bindgen_test]
    fn random_seeds_differ() {
        assert_ne!(js_random_seed(), js_random_seed());
    }
}
