//! Type definitions and enums for the application state and navigation.

/// Enumeration of available application screens.
///
/// This enumeration holds information about the current screen of the application. This is used
/// to determine which screen to render and what actions to take based on user input.
#[derive(Debug, PartialEq)]
pub(crate) enum Screen {
    /// Main menu screen of the application.
    ///
    /// This variant represents the main menu screen of the application.
    MainMenu(MainMenuItem),
    /// Options configuration screen.
    ///
    /// This variant represents the options menu screen, where the algorithm is chosen.
    OptionsMenu(OptionsMenuItem),
    /// Grid editor and search visualization screen.
    ///
    /// This variant represents the screen where the user draws the grid and watches the search.
    InGame,
}

/// Main menu navigation options.
///
/// This enumeration holds the different items in the main menu. It is used to determine which items
/// can the user select in the main menu.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum MainMenuItem {
    /// "Start" menu option.
    ///
    /// This variant represents the "Start" option in the main menu, which opens the grid editor.
    Start,
    /// "Options" menu option.
    ///
    /// This variant represents the "Options" option in the main menu.
    Options,
    /// "Quit" menu option.
    ///
    /// This variant represents the "Quit" option in the main menu.
    Quit,
}

/// Options menu navigation choices.
///
/// This enumeration holds the different items in the options menu. It is used to determine which
/// items can the user select in the options menu.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum OptionsMenuItem {
    /// Algorithm selection option.
    ///
    /// This variant represents the option that toggles between A* and Dijkstra's algorithm.
    Algorithm,
    /// "Back" navigation option.
    ///
    /// This variant represents the "Back" option in the options menu.
    Back,
}

/// Generic menu type configuration.
///
/// This enumeration holds the different specifics particular to each generic menu type in the
/// application's interface. Generic here means they share enough features to be considered worth
/// joining together part of their functionality.
pub(crate) enum MenuType {
    /// Main menu configuration.
    ///
    /// This variant represents the main menu in the application.
    MainMenu(u8),
    /// Options menu configuration.
    ///
    /// This variant represents the options menu in the application.
    OptionsMenu(u8),
}

impl MenuType {
    /// Returns the string representation of the menu type.
    ///
    /// This function provides the display name for each menu variant, used as the title in the
    /// menu's border when rendering the interface.
    pub(crate) const fn repr(&self) -> &str {
        match self {
            Self::MainMenu(_) => "Main Menu",
            Self::OptionsMenu(_) => "Options Menu",
        }
    }

    /// Returns the numeric value stored by the menu type variant.
    ///
    /// This function provides access to the number of menu items for layout calculations, allowing
    /// the UI to properly size the menu containers.
    pub(crate) const fn value(&self) -> u8 {
        match self {
            Self::MainMenu(value) | Self::OptionsMenu(value) => *value,
        }
    }
}
