use std::future::Future;
use uuid::Uuid;

use crate::error::AppResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
    /// Open and asking the user to confirm a destructive action.
    Confirming,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Screen rectangle occupied by the menu (trigger button included).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }
}

/// Open/close state of a dropdown, dismissed by pointer-down outside its bounds.
#[derive(Debug, Clone)]
pub struct Dropdown {
    state: MenuState,
    bounds: Bounds,
}

impl Dropdown {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            state: MenuState::Closed,
            bounds,
        }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != MenuState::Closed
    }

    /// Layout moved the menu.
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    pub fn toggle(&mut self) {
        self.state = match self.state {
            MenuState::Closed => MenuState::Open,
            MenuState::Open | MenuState::Confirming => MenuState::Closed,
        };
    }

    pub fn close(&mut self) {
        self.state = MenuState::Closed;
    }

    /// Only an open menu can ask for confirmation.
    pub fn request_confirmation(&mut self) -> bool {
        if self.state == MenuState::Open {
            self.state = MenuState::Confirming;
            return true;
        }
        self.state == MenuState::Confirming
    }

    pub fn cancel_confirmation(&mut self) {
        if self.state == MenuState::Confirming {
            self.state = MenuState::Open;
        }
    }

    /// Returns true when the press dismissed the menu.
    pub fn pointer_down(&mut self, at: Point) -> bool {
        if self.is_open() && !self.bounds.contains(at) {
            self.close();
            return true;
        }
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// First press on Delete only asks for confirmation.
    ConfirmationRequired,
    Deleted,
}

/// "Manage" menu on an organizer's event card.
#[derive(Debug, Clone)]
pub struct ManageEventMenu {
    pub dropdown: Dropdown,
    event_id: Uuid,
}

impl ManageEventMenu {
    pub fn new(event_id: Uuid, bounds: Bounds) -> Self {
        Self {
            dropdown: Dropdown::new(bounds),
            event_id,
        }
    }

    /// Closes the menu and returns the edit route.
    pub fn edit(&mut self) -> String {
        self.dropdown.close();
        format!("/edit-event/{}", self.event_id)
    }

    /// Deletes after confirmation. The menu closes whatever the outcome.
    pub async fn delete<F, Fut>(&mut self, remove: F) -> AppResult<DeleteOutcome>
    where
        F: FnOnce(Uuid) -> Fut,
        Fut: Future<Output = AppResult<()>>,
    {
        if self.dropdown.state() != MenuState::Confirming {
            self.dropdown.request_confirmation();
            return Ok(DeleteOutcome::ConfirmationRequired);
        }

        // &mut self держится на всё удаление, повторный вызов невозможен
        let result = remove(self.event_id).await;
        self.dropdown.close();

        result.map(|_| DeleteOutcome::Deleted)
    }
}

/// Account menu in the header.
#[derive(Debug, Clone)]
pub struct UserMenu {
    pub dropdown: Dropdown,
}

impl UserMenu {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            dropdown: Dropdown::new(bounds),
        }
    }

    /// Signs out and returns the route to land on.
    pub async fn sign_out<F, Fut>(&mut self, sign_out: F) -> AppResult<&'static str>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<()>>,
    {
        let result = sign_out().await;
        self.dropdown.close();
        result.map(|_| "/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    const MENU: Bounds = Bounds {
        x: 100.0,
        y: 10.0,
        width: 200.0,
        height: 150.0,
    };

    #[test]
    fn toggle_opens_and_closes() {
        let mut dd = Dropdown::new(MENU);
        assert_eq!(dd.state(), MenuState::Closed);
        dd.toggle();
        assert_eq!(dd.state(), MenuState::Open);
        dd.toggle();
        assert_eq!(dd.state(), MenuState::Closed);
    }

    #[test]
    fn outside_press_closes_from_any_state() {
        let outside = Point { x: 5.0, y: 5.0 };
        let inside = Point { x: 150.0, y: 50.0 };

        let mut dd = Dropdown::new(MENU);
        dd.toggle();
        assert!(!dd.pointer_down(inside));
        assert_eq!(dd.state(), MenuState::Open);
        assert!(dd.pointer_down(outside));
        assert_eq!(dd.state(), MenuState::Closed);

        dd.toggle();
        assert!(dd.request_confirmation());
        assert!(dd.pointer_down(outside));
        assert_eq!(dd.state(), MenuState::Closed);

        // закрытое меню клик снаружи не меняет
        assert!(!dd.pointer_down(outside));
    }

    #[test]
    fn confirmation_needs_open_menu() {
        let mut dd = Dropdown::new(MENU);
        assert!(!dd.request_confirmation());
        assert_eq!(dd.state(), MenuState::Closed);

        dd.toggle();
        assert!(dd.request_confirmation());
        dd.cancel_confirmation();
        assert_eq!(dd.state(), MenuState::Open);

        dd.request_confirmation();
        dd.toggle();
        assert_eq!(dd.state(), MenuState::Closed);
    }

    #[tokio::test]
    async fn delete_asks_first_then_closes() {
        let id = Uuid::new_v4();
        let mut menu = ManageEventMenu::new(id, MENU);
        menu.dropdown.toggle();

        let first = menu.delete(|_| async { Ok(()) }).await.unwrap();
        assert_eq!(first, DeleteOutcome::ConfirmationRequired);
        assert_eq!(menu.dropdown.state(), MenuState::Confirming);

        let second = menu
            .delete(|event_id| async move {
                assert_eq!(event_id, id);
                Ok(())
            })
            .await
            .unwrap();
        assert_eq!(second, DeleteOutcome::Deleted);
        assert_eq!(menu.dropdown.state(), MenuState::Closed);

        // после удаления меню снова требует подтверждения, remove не вызывается
        let mut removals = 0;
        let again = menu
            .delete(|_| {
                removals += 1;
                async { Ok(()) }
            })
            .await
            .unwrap();
        assert_eq!(again, DeleteOutcome::ConfirmationRequired);
        assert_eq!(removals, 0);
    }

    #[tokio::test]
    async fn failed_delete_still_closes() {
        let mut menu = ManageEventMenu::new(Uuid::new_v4(), MENU);
        menu.dropdown.toggle();
        menu.dropdown.request_confirmation();

        let err = menu
            .delete(|_| async { Err(AppError::Backend("permission denied".into())) })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "permission denied");
        assert_eq!(menu.dropdown.state(), MenuState::Closed);
    }

    #[test]
    fn edit_closes_and_routes() {
        let id = Uuid::new_v4();
        let mut menu = ManageEventMenu::new(id, MENU);
        menu.dropdown.toggle();
        assert_eq!(menu.edit(), format!("/edit-event/{}", id));
        assert!(!menu.dropdown.is_open());
    }

    #[tokio::test]
    async fn sign_out_lands_on_home() {
        let mut menu = UserMenu::new(MENU);
        menu.dropdown.toggle();
        let route = menu.sign_out(|| async { Ok(()) }).await.unwrap();
        assert_eq!(route, "/");
        assert!(!menu.dropdown.is_open());
    }
}
