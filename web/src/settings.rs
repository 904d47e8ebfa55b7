use crate::utils::*;
use pairmatch_core as game;
use serde::{Deserialize, Serialize};
use yew::prelude::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub dimension: game::Coord,
}

impl Settings {
    /// Falls back to the largest dimension the pool can fill when the stored one no longer fits.
    pub(crate) fn fit_to(self, pool: &game::ImagePool) -> Self {
        match pool.check_dimension(self.dimension) {
            Ok(_) => self,
            Err(err) => {
                log::warn!("stored settings rejected: {}", err);
                let dimension = pool
                    .supported_dimensions()
                    .filter(|&dimension| dimension <= game::GameConfig::DEFAULT_DIMENSION)
                    .last()
                    .unwrap_or(game::GameConfig::DEFAULT_DIMENSION);
                Self { dimension }
            }
        }
    }

    pub(crate) fn game_config(self) -> game::GameConfig {
        game::GameConfig::with_dimension(self.dimension)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dimension: game::GameConfig::DEFAULT_DIMENSION,
        }
    }
}

impl StorageKey for Settings {
    const KEY: &'static str = "pairmatch:settings:v1";
}

#[derive(Properties, PartialEq)]
pub(crate) struct SettingsProps {
    #[prop_or_default]
    pub open: bool,
    pub current: Settings,
    pub dimensions: Vec<game::Coord>,
    pub on_change: Callback<Settings>,
    pub on_close: Callback<()>,
}

#[function_component]
pub(crate) fn SettingsView(props: &SettingsProps) -> Html {
    let on_close = props.on_close.clone();

    html! {
        <dialog id="settings" open={props.open}>
            <article>
                <h2>{"Settings"}</h2>
                <ul>
                    {
                        for props.dimensions.iter().map(|&dimension| {
                            let on_change = props.on_change.clone();
                            let selected = props.current.dimension == dimension;
                            let onclick = Callback::from(move |_: MouseEvent| {
                                on_change.emit(Settings { dimension })
                            });
                            html! {
                                <li>
                                    <button class={classes!(selected.then_some("selected"))} {onclick}>
                                        {format!("{dimension} × {dimension}")}
                                    </button>
                                </li>
                            }
                        })
                    }
                </ul>
                <footer>
                    <button onclick={move |_| on_close.emit(())}>{"Close"}</button>
                </footer>
            </article>
        </dialog>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_dimension_is_kept() {
        let settings = Settings { dimension: 2 };

        assert_eq!(settings.fit_to(&game::ImagePool::default()), settings);
    }

    #[test]
    fn unsupported_dimension_falls_back() {
        let pool = game::ImagePool::default();

        assert_eq!(Settings { dimension: 3 }.fit_to(&pool).dimension, 4);
        assert_eq!(Settings { dimension: 8 }.fit_to(&pool).dimension, 4);

        let small = game::ImagePool::new(["a", "b", "c"]);
        assert_eq!(Settings { dimension: 4 }.fit_to(&small).dimension, 2);
    }

    #[test]
    fn storage_key_is_versioned() {
        assert_eq!(<Settings as StorageKey>::KEY, "pairmatch:settings:v1");
    }
}
