//! 撮影→推定→確認→記録の一連の流れ
//!
//! 画面遷移・チャットログ・確認中セッション・リクエストゲートをまとめて保持する。
//! UI（Leptos / ターミナル）はこの状態を描画し、ユーザー操作と通信結果を渡すだけ。

use crate::error::{Error, Result};
use crate::gate::{RequestGate, RequestToken};
use crate::navigator::{NavEvent, Navigator, Screen};
use crate::presenter::ResultsView;
use crate::processing::ProcessingTicker;
use crate::session::{ImageRef, ReviewSession};
use crate::transcript::Transcript;
use crate::types::MacrosResponse;

/// 結果画面で確認中の内容
#[derive(Debug, Clone, PartialEq)]
pub enum Review {
    NoFood { image: ImageRef, message: String },
    Estimate(ReviewSession),
}

/// 送信を受け付けたチャットメッセージ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSubmission {
    pub token: RequestToken,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct FoodScan {
    navigator: Navigator,
    transcript: Transcript,
    review: Option<Review>,
    pending_image: Option<ImageRef>,
    scan_gate: RequestGate,
    chat_gate: RequestGate,
    ticker: ProcessingTicker,
}

impl FoodScan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen(&self) -> Screen {
        self.navigator.current()
    }

    pub fn is_visible(&self, screen: Screen) -> bool {
        self.navigator.is_visible(screen)
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn review(&self) -> Option<&Review> {
        self.review.as_ref()
    }

    /// 結果画面の描画内容
    pub fn results_view(&self) -> Option<ResultsView> {
        self.review.as_ref().map(|review| match review {
            Review::NoFood { image, message } => ResultsView::no_food(image.clone(), message),
            Review::Estimate(session) => ResultsView::estimate(session),
        })
    }

    /// 解析中の写真
    pub fn processing_image(&self) -> Option<&ImageRef> {
        self.pending_image.as_ref()
    }

    pub fn processing_text(&self) -> &'static str {
        self.ticker.current()
    }

    pub fn advance_processing(&mut self) -> &'static str {
        self.ticker.advance()
    }

    pub fn is_scanning(&self) -> bool {
        self.scan_gate.is_in_flight()
    }

    pub fn is_chatting(&self) -> bool {
        self.chat_gate.is_in_flight()
    }

    // ---- カメラ ----

    pub fn open_camera(&mut self) -> Result<Screen> {
        self.navigator.dispatch(NavEvent::OpenCamera)
    }

    pub fn close_camera(&mut self) -> Result<Screen> {
        self.navigator.dispatch(NavEvent::Back)
    }

    /// 写真を送信して解析中画面へ。前回の推定はここで破棄される
    pub fn submit_image(&mut self, image: ImageRef) -> Result<RequestToken> {
        let from = self.screen();
        if Navigator::target(from, NavEvent::ImageSelected).is_none() {
            return Err(Error::InvalidTransition {
                from,
                event: NavEvent::ImageSelected,
            });
        }
        let token = self.scan_gate.begin().ok_or(Error::RequestInFlight)?;
        self.navigator.dispatch(NavEvent::ImageSelected)?;
        self.review = None;
        self.pending_image = Some(image);
        self.ticker.reset();
        Ok(token)
    }

    /// 推定結果を受け取る。古いトークンの応答は破棄してfalse
    pub fn receive_estimate(&mut self, token: RequestToken, response: MacrosResponse) -> bool {
        if !self.scan_gate.settle(token) {
            tracing::warn!(generation = token.generation(), "discarding stale estimate response");
            return false;
        }
        let image = self
            .pending_image
            .take()
            .unwrap_or_else(|| ImageRef::new(""));
        if let Err(e) = self.navigator.dispatch(NavEvent::EstimateReceived) {
            tracing::warn!(error = %e, "estimate arrived outside processing screen");
            return false;
        }
        self.review = Some(match response {
            MacrosResponse::NoFood { message } => Review::NoFood { image, message },
            MacrosResponse::Estimate(estimate) => {
                tracing::debug!(food = %estimate.food, "estimate loaded");
                Review::Estimate(ReviewSession::new(image, estimate))
            }
        });
        true
    }

    /// 推定リクエストの失敗。インジケータを消してチャットにエラーを表示
    ///
    /// 打ち切ったリクエストは放棄するので、後から応答が届いても反映されない
    pub fn scan_failed(&mut self, token: RequestToken, message: &str) -> bool {
        if !self.scan_gate.is_current(token) {
            tracing::warn!(generation = token.generation(), "discarding stale scan failure");
            return false;
        }
        self.scan_gate.abandon();
        self.pending_image = None;
        if let Err(e) = self.navigator.dispatch(NavEvent::RequestFailed) {
            tracing::warn!(error = %e, "scan failure outside processing screen");
        }
        self.transcript
            .log_error(&format!("Couldn't analyze that photo: {}", message));
        true
    }

    // ---- 結果画面 ----

    fn session_mut(&mut self) -> Option<&mut ReviewSession> {
        match self.review.as_mut() {
            Some(Review::Estimate(session)) if self.navigator.is_visible(Screen::Results) => Some(session),
            _ => None,
        }
    }

    pub fn increment(&mut self) -> bool {
        match self.session_mut() {
            Some(session) => {
                session.increment();
                true
            }
            None => false,
        }
    }

    pub fn decrement(&mut self) -> bool {
        self.session_mut().is_some_and(|session| session.decrement())
    }

    /// 推定を確定してチャットに記録。追記したエントリ数を返す
    ///
    /// セッションを消費するため、同じ推定を二重に確定することはない
    pub fn confirm(&mut self) -> Result<usize> {
        if self.session_mut().is_none() {
            return Err(Error::NoActiveEstimate);
        }
        let Some(Review::Estimate(session)) = self.review.take() else {
            return Err(Error::NoActiveEstimate);
        };
        let added = self
            .transcript
            .log_confirmed_estimate(&session.estimate, &session.image, session.quantity);
        self.navigator.dispatch(NavEvent::Confirm)?;
        Ok(added)
    }

    /// 推定を破棄してカメラへ戻る（記録しない）
    pub fn retake(&mut self) -> Result<Screen> {
        if self.session_mut().is_none() {
            return Err(Error::NoActiveEstimate);
        }
        let screen = self.navigator.dispatch(NavEvent::Retake)?;
        self.review = None;
        Ok(screen)
    }

    /// 「食べ物なし」を確認してチャットへ戻る
    pub fn acknowledge_no_food(&mut self) -> Result<Screen> {
        if !matches!(self.review, Some(Review::NoFood { .. })) {
            return Err(Error::InvalidTransition {
                from: self.screen(),
                event: NavEvent::AcknowledgeNoFood,
            });
        }
        let screen = self.navigator.dispatch(NavEvent::AcknowledgeNoFood)?;
        self.review = None;
        Ok(screen)
    }

    // ---- チャット ----

    /// メッセージ送信。空文字・返信待ち中・チャット画面以外では受け付けない
    pub fn send_chat(&mut self, text: &str) -> Option<ChatSubmission> {
        let message = text.trim();
        if message.is_empty() || !self.navigator.is_visible(Screen::Chat) {
            return None;
        }
        let Some(token) = self.chat_gate.begin() else {
            tracing::debug!("chat request already in flight; ignoring message");
            return None;
        };
        self.transcript.log_user_text(message);
        self.transcript.log_thinking();
        Some(ChatSubmission {
            token,
            message: message.to_string(),
        })
    }

    pub fn receive_reply(&mut self, token: RequestToken, reply: Option<&str>) -> bool {
        if !self.chat_gate.settle(token) {
            tracing::warn!(generation = token.generation(), "discarding stale chat reply");
            return false;
        }
        self.transcript.clear_thinking();
        self.transcript.log_bot_reply(reply);
        true
    }

    pub fn chat_failed(&mut self, token: RequestToken, message: &str) -> bool {
        if !self.chat_gate.is_current(token) {
            return false;
        }
        self.chat_gate.abandon();
        self.transcript.clear_thinking();
        self.transcript
            .log_error(&format!("Couldn't reach the assistant: {}", message));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::ResultsAction;
    use crate::transcript::{Entry, FALLBACK_REPLY};

    const APPLE: &str = r#"{
        "food": "Apple",
        "quantity": {"value": 2, "unit": "pcs", "weight_g": 100},
        "macros_per_unit": {"calories": 52, "protein_g": 0.3, "carbs_g": 14, "fat_g": 0.2, "fibre_g": 2.4},
        "ingredients": [{"item": "apple", "quantity": "2 medium", "confidence": 0.93}],
        "notes": ""
    }"#;

    fn apple() -> MacrosResponse {
        MacrosResponse::from_json(APPLE).unwrap()
    }

    fn at_results(response: MacrosResponse) -> FoodScan {
        let mut app = FoodScan::new();
        app.open_camera().unwrap();
        let token = app.submit_image(ImageRef::new("blob:apple")).unwrap();
        assert!(app.receive_estimate(token, response));
        app
    }

    #[test]
    fn test_scan_and_confirm() {
        let mut app = at_results(apple());
        assert_eq!(app.screen(), Screen::Results);
        let view = app.results_view().unwrap();
        assert!(matches!(view, ResultsView::EstimateShown { quantity: 2, .. }));

        assert_eq!(app.confirm().unwrap(), 2);
        assert_eq!(app.screen(), Screen::Chat);
        assert!(app.review().is_none());
        assert_eq!(app.transcript().len(), 2);
    }

    #[test]
    fn test_confirm_only_once() {
        let mut app = at_results(apple());
        app.confirm().unwrap();
        assert!(matches!(app.confirm(), Err(Error::NoActiveEstimate)));
        assert_eq!(app.transcript().len(), 2);
    }

    #[test]
    fn test_quantity_controls() {
        let mut app = at_results(apple());
        assert!(app.increment());
        assert!(app.decrement());
        assert!(app.decrement());
        assert!(!app.decrement());
        let Some(ResultsView::EstimateShown { quantity, calories_line, .. }) = app.results_view() else {
            panic!("推定表示であるべき");
        };
        assert_eq!(quantity, 1);
        assert_eq!(calories_line, "52 kcal");

        app.confirm().unwrap();
        let Entry::FoodCard(card) = &app.transcript().entries()[1].entry else {
            panic!("食事カードであるべき");
        };
        assert_eq!(card.quantity_line, "Quantity: 1 × pcs");
    }

    #[test]
    fn test_no_food_flow() {
        let response = MacrosResponse::NoFood {
            message: "Image unclear, please retake.".to_string(),
        };
        let mut app = at_results(response);
        let view = app.results_view().unwrap();
        assert_eq!(view.actions(), &[ResultsAction::Acknowledge]);
        assert!(!app.increment());
        assert!(app.confirm().is_err());
        assert!(app.retake().is_err());

        assert_eq!(app.acknowledge_no_food().unwrap(), Screen::Chat);
        assert!(app.transcript().is_empty());
    }

    #[test]
    fn test_retake_discards_without_logging() {
        let mut app = at_results(apple());
        assert_eq!(app.retake().unwrap(), Screen::Camera);
        assert!(app.review().is_none());
        assert!(app.transcript().is_empty());
    }

    #[test]
    fn test_new_scan_resets_quantity() {
        let mut app = at_results(apple());
        app.increment();
        app.increment();
        app.retake().unwrap();
        let token = app.submit_image(ImageRef::new("blob:again")).unwrap();
        app.receive_estimate(token, apple());
        let Some(ResultsView::EstimateShown { quantity, image, .. }) = app.results_view() else {
            panic!("推定表示であるべき");
        };
        assert_eq!(quantity, 2);
        assert_eq!(image, ImageRef::new("blob:again"));
    }

    #[test]
    fn test_submit_requires_camera() {
        let mut app = FoodScan::new();
        assert!(matches!(
            app.submit_image(ImageRef::new("x")),
            Err(Error::InvalidTransition { from: Screen::Chat, .. })
        ));
        assert!(!app.is_scanning());
    }

    #[test]
    fn test_stale_estimate_discarded() {
        let mut app = at_results(apple());
        app.retake().unwrap();
        let current = app.submit_image(ImageRef::new("blob:2")).unwrap();
        assert!(app.receive_estimate(current, apple()));
        // 同じトークンの重複応答
        assert!(!app.receive_estimate(current, MacrosResponse::NoFood { message: String::new() }));
        assert!(matches!(app.review(), Some(Review::Estimate(_))));
    }

    #[test]
    fn test_scan_failure_surfaces_error() {
        let mut app = FoodScan::new();
        app.open_camera().unwrap();
        let token = app.submit_image(ImageRef::new("blob:1")).unwrap();
        assert!(app.scan_failed(token, "request timed out"));
        assert_eq!(app.screen(), Screen::Chat);
        assert!(app.processing_image().is_none());
        assert!(!app.is_scanning());
        assert_eq!(
            app.transcript().entries()[0].entry,
            Entry::Error("Couldn't analyze that photo: request timed out".to_string())
        );
    }

    #[test]
    fn test_late_estimate_after_failure_discarded() {
        let mut app = FoodScan::new();
        app.open_camera().unwrap();
        let timed_out = app.submit_image(ImageRef::new("blob:slow")).unwrap();
        assert!(app.scan_failed(timed_out, "request timed out after 60s"));

        app.open_camera().unwrap();
        let retry = app.submit_image(ImageRef::new("blob:retry")).unwrap();
        assert!(!app.receive_estimate(timed_out, apple()));
        assert!(!app.scan_failed(timed_out, "late failure"));
        assert_eq!(app.screen(), Screen::Processing);
        assert_eq!(app.transcript().len(), 1);

        assert!(app.receive_estimate(retry, apple()));
        let Some(ResultsView::EstimateShown { image, .. }) = app.results_view() else {
            panic!("推定表示であるべき");
        };
        assert_eq!(image, ImageRef::new("blob:retry"));
    }

    #[test]
    fn test_chat_round_trip() {
        let mut app = FoodScan::new();
        let submission = app.send_chat("  how much protein?  ").unwrap();
        assert_eq!(submission.message, "how much protein?");
        assert!(app.transcript().has_thinking());
        assert!(app.send_chat("another").is_none());

        assert!(app.receive_reply(submission.token, None));
        let entries: Vec<_> = app.transcript().entries().iter().map(|e| e.entry.clone()).collect();
        assert_eq!(entries, vec![
            Entry::UserText("how much protein?".to_string()),
            Entry::BotText(FALLBACK_REPLY.to_string()),
        ]);
    }

    #[test]
    fn test_chat_ignores_blank_text() {
        let mut app = FoodScan::new();
        assert!(app.send_chat("   ").is_none());
        assert!(app.transcript().is_empty());
        assert!(!app.is_chatting());
    }

    #[test]
    fn test_chat_failure_removes_thinking() {
        let mut app = FoodScan::new();
        let submission = app.send_chat("hello").unwrap();
        assert!(app.chat_failed(submission.token, "HTTP 502"));
        assert!(!app.transcript().has_thinking());
        assert_eq!(app.transcript().len(), 2);
        assert!(app.send_chat("retry").is_some());
    }

    #[test]
    fn test_late_reply_after_chat_failure_discarded() {
        let mut app = FoodScan::new();
        let first = app.send_chat("hello").unwrap();
        assert!(app.chat_failed(first.token, "request timed out after 60s"));
        assert!(!app.receive_reply(first.token, Some("too late")));
        assert_eq!(app.transcript().len(), 2);
        assert!(!app.is_chatting());
    }

    #[test]
    fn test_reply_arrives_after_leaving_chat() {
        let mut app = FoodScan::new();
        let submission = app.send_chat("hello").unwrap();
        app.open_camera().unwrap();
        assert!(app.receive_reply(submission.token, Some("hi!")));
        assert_eq!(app.screen(), Screen::Camera);
        assert_eq!(app.transcript().entries()[1].entry, Entry::BotText("hi!".to_string()));
    }
}
