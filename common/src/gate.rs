//! 非同期リクエストの単一実行ゲート
//!
//! 世代番号付きトークンを発行し、現在の世代と一致しない応答は破棄する。

/// 発行済みリクエストの識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken {
    generation: u64,
}

impl RequestToken {
    pub fn generation(self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Default)]
pub struct RequestGate {
    generation: u64,
    in_flight: bool,
}

impl RequestGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// 新しいリクエストを開始。実行中ならNone
    pub fn begin(&mut self) -> Option<RequestToken> {
        if self.in_flight {
            return None;
        }
        self.generation += 1;
        self.in_flight = true;
        Some(RequestToken {
            generation: self.generation,
        })
    }

    /// 応答を受理できるか判定し、受理したらゲートを開放
    pub fn settle(&mut self, token: RequestToken) -> bool {
        if self.is_current(token) {
            self.in_flight = false;
            true
        } else {
            false
        }
    }

    /// 実行中のリクエストを放棄。後から届いた応答はすべて古い扱いになる
    pub fn abandon(&mut self) {
        self.generation += 1;
        self.in_flight = false;
    }

    /// トークンが実行中リクエストのものか
    pub fn is_current(&self, token: RequestToken) -> bool {
        self.in_flight && token.generation == self.generation
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }
}
