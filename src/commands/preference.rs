//! Handler for the `preference` command.

use anyhow::Result;
use colored::*;

use clarion_fence_lib::config::Config;
use clarion_fence_lib::exit_codes::SUCCESS;
use clarion_fence_lib::preference::{PreferenceStore, WrapPreference};
use clarion_fence_lib::toolbar;

use crate::{PreferenceCommand, PreferenceValue};

pub fn handle_preference(action: PreferenceCommand, config: &Config) -> Result<i32> {
    let Some(store) = config.preference_store() else {
        anyhow::bail!("Cannot determine where the wrap preference is stored; set global.preference-file");
    };

    match action {
        PreferenceCommand::Show => {
            let shown = store.get().map_or("unset", WrapPreference::as_str);
            println!("{shown}");
            log::debug!("[clarion-fence] Preference file: {}", store.path().display());
        }
        PreferenceCommand::Set { value } => {
            let pref = match value {
                PreferenceValue::Always => WrapPreference::Always,
                PreferenceValue::Never => WrapPreference::Never,
            };
            store.set(pref)?;
            println!("{} {}", "Wrap preference set to".green().bold(), pref);
        }
        PreferenceCommand::Reset => {
            toolbar::reset_preference(&store)?;
            println!("{}", "Wrap preference reset".green().bold());
        }
    }

    Ok(SUCCESS)
}
