//! DOM view: balls, life, target and end-of-round messages

use std::collections::HashMap;

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement};

use crate::dom_ids;
use crate::sim::{Ball, BallStatus};

/// Owns the ball elements and the HUD nodes of the page
pub struct View {
    document: Document,
    field: HtmlElement,
    balls: HashMap<u32, HtmlElement>,
    ball_size: f32,
}

fn px(v: f32) -> String {
    format!("{}px", v.round())
}

impl View {
    pub fn new(document: Document, ball_size: f32) -> Result<Self, JsValue> {
        let field = document
            .get_element_by_id(dom_ids::FIELD)
            .ok_or_else(|| JsValue::from_str("missing #ventanaJuego"))?
            .dyn_into::<HtmlElement>()?;
        Ok(Self {
            document,
            field,
            balls: HashMap::new(),
            ball_size,
        })
    }

    pub fn field(&self) -> &HtmlElement {
        &self.field
    }

    /// Field size in pixels
    pub fn field_size(&self) -> Vec2 {
        Vec2::new(
            self.field.client_width() as f32,
            self.field.client_height() as f32,
        )
    }

    fn html_by_id(&self, id: &str) -> Option<HtmlElement> {
        self.document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }

    /// Place an element in the middle of the field
    pub fn center_in_field(&self, id: &str) {
        let Some(el) = self.html_by_id(id) else {
            log::warn!("#{} not found, cannot center it", id);
            return;
        };
        let left = self.field.client_width() / 2 - el.client_width() / 2;
        let top = self.field.client_height() / 2 - el.client_height() / 2;
        let style = el.style();
        let _ = style.set_property("left", &format!("{}px", left));
        let _ = style.set_property("top", &format!("{}px", top));
    }

    /// Show the divisor the player hunts for
    pub fn show_target(&self, target: u32) {
        if let Some(el) = self.document.get_element_by_id(dom_ids::TARGET) {
            el.set_text_content(Some(&target.to_string()));
        }
    }

    /// Show remaining life (second child of the life box, or the box itself)
    pub fn show_life(&self, life: u32) {
        let Some(el) = self.document.get_element_by_id(dom_ids::LIFE) else {
            return;
        };
        let target = el.children().item(1).unwrap_or(el);
        target.set_text_content(Some(&life.to_string()));
    }

    /// Show the score kept from a previous round
    pub fn show_last_score(&self, score: Option<u32>) {
        if let Some(el) = self.document.get_element_by_id(dom_ids::LAST_SCORE) {
            let text = score.map(|s| s.to_string()).unwrap_or_else(|| "-".into());
            el.set_text_content(Some(&text));
        }
    }

    /// Create one element per ball
    pub fn spawn_balls(&mut self, balls: &[Ball]) -> Result<(), JsValue> {
        for ball in balls {
            let el = self
                .document
                .create_element("div")?
                .dyn_into::<HtmlElement>()?;
            el.set_class_name(ball.status.css_class());
            el.set_attribute(dom_ids::BALL_ID_ATTR, &ball.id.to_string())?;
            el.append_child(&self.document.create_text_node(&ball.number.to_string()))?;

            let style = el.style();
            style.set_property("position", "absolute")?;
            style.set_property("width", &px(self.ball_size))?;
            style.set_property("height", &px(self.ball_size))?;
            style.set_property("left", &px(ball.pos.x))?;
            style.set_property("top", &px(ball.pos.y))?;

            self.field.append_child(&el)?;
            self.balls.insert(ball.id, el);
        }
        log::debug!("Spawned {} ball elements", balls.len());
        Ok(())
    }

    /// Sync element positions with the model
    pub fn move_balls(&self, balls: &[Ball]) {
        for ball in balls {
            if let Some(el) = self.balls.get(&ball.id) {
                let style = el.style();
                let _ = style.set_property("left", &px(ball.pos.x));
                let _ = style.set_property("top", &px(ball.pos.y));
            }
        }
    }

    pub fn set_ball_status(&self, id: u32, status: BallStatus) {
        if let Some(el) = self.balls.get(&id) {
            el.set_class_name(status.css_class());
        }
    }

    pub fn remove_ball(&mut self, id: u32) {
        if let Some(el) = self.balls.remove(&id) {
            el.remove();
        }
    }

    /// Remove every ball element, clicked or not
    pub fn clear_balls(&mut self) {
        for (_, el) in self.balls.drain() {
            el.remove();
        }
    }

    /// Stop and remove the page's background track, if any
    pub fn remove_background_audio(&self) {
        let Ok(Some(el)) = self.document.query_selector("audio") else {
            return;
        };
        if let Ok(media) = el.clone().dyn_into::<web_sys::HtmlMediaElement>() {
            let _ = media.pause();
        }
        el.remove();
    }

    fn show_message(&self, class: &str, text: &str) -> Result<(), JsValue> {
        let el = self.document.create_element("div")?;
        el.set_id("resultado");
        el.set_class_name(class);
        el.set_text_content(Some(text));
        self.field.append_child(&el)?;
        Ok(())
    }

    pub fn show_winner(&self, score: u32) -> Result<(), JsValue> {
        self.show_message("ganador", &format!("¡HAS GANADO! Puntuación: {}", score))
    }

    pub fn show_loser(&self) -> Result<(), JsValue> {
        self.show_message("perdedor", "HAS PERDIDO")
    }

    /// Create a button inside the field
    pub fn create_button(&self, text: &str, id: &str) -> Result<Element, JsValue> {
        let btn = self.document.create_element("button")?;
        btn.set_id(id);
        btn.set_text_content(Some(text));
        self.field.append_child(&btn)?;
        Ok(btn)
    }

    pub fn remove_by_id(&self, id: &str) {
        if let Some(el) = self.document.get_element_by_id(id) {
            el.remove();
        }
    }

    /// Ball id carried by a clicked element
    pub fn ball_id_of(target: &Element) -> Option<u32> {
        target
            .closest(&format!("[{}]", dom_ids::BALL_ID_ATTR))
            .ok()
            .flatten()?
            .get_attribute(dom_ids::BALL_ID_ATTR)?
            .parse()
            .ok()
    }
}
