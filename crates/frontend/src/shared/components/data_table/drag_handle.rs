//! Row drag handle.
//!
//! Pointer events cover mouse, touch and pen with one code path: the handle
//! captures the pointer, the row under the pointer becomes the drop target
//! (upper half = before, lower half = after) and the move is committed on
//! release. Arrow keys on the focused handle move the row by one position.

use crate::shared::data_grid::DropPosition;
use crate::shared::icons::icon;
use contracts::shared::data_grid::RowId;
use leptos::ev::{KeyboardEvent, PointerEvent};
use leptos::prelude::*;
use wasm_bindgen::JsCast;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DragState {
    pub dragging: Option<RowId>,
    pub target: Option<(RowId, DropPosition)>,
}

impl DragState {
    /// Row modifier class while a drag hovers `row`
    pub fn row_class(&self, row: &RowId) -> &'static str {
        if self.dragging.as_ref() == Some(row) {
            return "data-table__row--dragging";
        }
        match &self.target {
            Some((target, DropPosition::Before)) if target == row => "data-table__row--drop-before",
            Some((target, DropPosition::After)) if target == row => "data-table__row--drop-after",
            _ => "",
        }
    }
}

/// `data-row-id` and drop position of the table row under the pointer
fn drop_target_at(client_x: i32, client_y: i32) -> Option<(String, DropPosition)> {
    let document = web_sys::window()?.document()?;
    let element = document.element_from_point(client_x as f32, client_y as f32)?;
    let row = element.closest("tr[data-row-id]").ok()??;
    let key = row.get_attribute("data-row-id")?;
    let rect = row.get_bounding_client_rect();
    Some((
        key,
        DropPosition::from_pointer(client_y as f64, rect.top(), rect.height()),
    ))
}

fn handle_element(ev: &PointerEvent) -> Option<web_sys::Element> {
    ev.current_target()?.dyn_into::<web_sys::Element>().ok()
}

#[component]
pub fn DragHandleCell(
    row_id: RowId,
    drag: RwSignal<DragState>,
    /// Resolves a `data-row-id` back to the row id
    resolve: Callback<String, Option<RowId>>,
    /// (dragged, target, position)
    on_drop: Callback<(RowId, RowId, DropPosition)>,
    /// (row, delta) from the keyboard
    on_move_by: Callback<(RowId, isize)>,
) -> impl IntoView {
    let id_for_down = row_id.clone();
    let id_for_key = row_id;

    let on_pointer_down = move |ev: PointerEvent| {
        if ev.button() != 0 {
            return;
        }
        ev.prevent_default();
        if let Some(handle) = handle_element(&ev) {
            let _ = handle.set_pointer_capture(ev.pointer_id());
        }
        drag.set(DragState {
            dragging: Some(id_for_down.clone()),
            target: None,
        });
    };

    let on_pointer_move = move |ev: PointerEvent| {
        if drag.with_untracked(|d| d.dragging.is_none()) {
            return;
        }
        let target = drop_target_at(ev.client_x(), ev.client_y())
            .and_then(|(key, position)| resolve.run(key).map(|id| (id, position)));
        if drag.with_untracked(|d| d.target != target) {
            drag.update(|d| d.target = target);
        }
    };

    let on_pointer_up = move |ev: PointerEvent| {
        if let Some(handle) = handle_element(&ev) {
            let _ = handle.release_pointer_capture(ev.pointer_id());
        }
        let state = drag.get_untracked();
        drag.set(DragState::default());
        if let (Some(from), Some((to, position))) = (state.dragging, state.target) {
            on_drop.run((from, to, position));
        }
    };

    let on_key_down = move |ev: KeyboardEvent| {
        let delta = match ev.key().as_str() {
            "ArrowUp" => -1,
            "ArrowDown" => 1,
            _ => return,
        };
        ev.prevent_default();
        on_move_by.run((id_for_key.clone(), delta));
    };

    view! {
        <td class="table__cell data-table__drag-cell">
            <span
                class="data-table__drag-handle"
                tabindex="0"
                role="button"
                aria-label="Drag to reorder, arrow keys to move"
                on:pointerdown=on_pointer_down
                on:pointermove=on_pointer_move
                on:pointerup=on_pointer_up
                on:pointercancel=move |_| drag.set(DragState::default())
                on:keydown=on_key_down
            >
                {icon("grip")}
            </span>
        </td>
    }
}
