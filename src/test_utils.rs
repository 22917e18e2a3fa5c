//! テスト用ユーティリティ
//!
//! 複数のテストモジュールで使用される共通のフェイク実装を提供します。
#![cfg(test)]
#![allow(clippy::unwrap_used)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

use crate::locale::Locale;
use crate::resolver::context::{
    CookieStore,
    Principal,
    RequestContext,
    SessionStore,
};
use crate::translations::TranslationMap;

/// リテラルのペアから `TranslationMap` を作成する
pub(crate) fn translation_map(pairs: &[(&str, &str)]) -> TranslationMap {
    pairs.iter().copied().collect()
}

/// 検証済み `Locale` を作成する（テスト専用）
pub(crate) fn locale(tag: &str) -> Locale {
    Locale::parse(tag).unwrap()
}

/// インメモリのセッションストア
#[derive(Debug, Default)]
pub(crate) struct MemoryStore {
    /// 保存された値
    values: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    /// 初期値を設定する
    pub(crate) fn set(&self, key: &str, value: &str) {
        self.values.borrow_mut().insert(key.to_string(), value.to_string());
    }

    /// 保存された値を取得する
    pub(crate) fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }
}

impl SessionStore for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.get(key)
    }

    fn write(&self, key: &str, value: &str) {
        self.set(key, value);
    }
}

/// インメモリのクッキーストア（直近の max-age を記録する）
#[derive(Debug, Default)]
pub(crate) struct MemoryCookies {
    /// 保存された値
    values: RefCell<HashMap<String, String>>,
    /// 直近の書き込みで指定された max-age
    last_max_age: RefCell<Option<Duration>>,
}

impl MemoryCookies {
    /// 初期値を設定する
    pub(crate) fn set(&self, name: &str, value: &str) {
        self.values.borrow_mut().insert(name.to_string(), value.to_string());
    }

    /// 保存された値を取得する
    pub(crate) fn get(&self, name: &str) -> Option<String> {
        self.values.borrow().get(name).cloned()
    }

    /// 直近の書き込みで指定された max-age
    pub(crate) fn last_max_age(&self) -> Option<Duration> {
        *self.last_max_age.borrow()
    }
}

impl CookieStore for MemoryCookies {
    fn read(&self, name: &str) -> Option<String> {
        self.get(name)
    }

    fn write(&self, name: &str, value: &str, max_age: Duration) {
        self.set(name, value);
        *self.last_max_age.borrow_mut() = Some(max_age);
    }
}

/// ロケール設定を持つフェイクの認証済みユーザー
#[derive(Debug, Default)]
pub(crate) struct FakePrincipal {
    /// 主設定フィールド
    pub(crate) preferred: Option<String>,
    /// 別名フィールド
    pub(crate) alias: Option<String>,
    /// 更新を受け付けるかどうか
    pub(crate) updatable: bool,
    /// 記録された更新
    pub(crate) updated: RefCell<Option<Locale>>,
}

impl Principal for FakePrincipal {
    fn preferred_locale(&self) -> Option<String> {
        self.preferred.clone()
    }

    fn locale_alias(&self) -> Option<String> {
        self.alias.clone()
    }

    fn set_preferred_locale(&self, locale: &Locale) -> bool {
        if self.updatable {
            *self.updated.borrow_mut() = Some(locale.clone());
        }
        self.updatable
    }
}

/// `RequestContext` のフェイク実装
#[derive(Debug, Default)]
pub(crate) struct FakeRequest {
    /// リクエストパラメータ
    pub(crate) params: HashMap<String, String>,
    /// リクエストパス
    pub(crate) path: String,
    /// ホスト名
    pub(crate) host: Option<String>,
    /// ヘッダー（小文字キー）
    pub(crate) headers: HashMap<String, String>,
    /// セッションストア
    pub(crate) session: MemoryStore,
    /// クッキーストア
    pub(crate) cookies: MemoryCookies,
    /// 認証済みユーザー
    pub(crate) principal: Option<FakePrincipal>,
    /// クライアントアドレス
    pub(crate) remote_addr: Option<String>,
}

impl FakeRequest {
    /// 空のリクエストを作成する
    pub(crate) fn new() -> Self {
        Self { path: "/".to_string(), ..Self::default() }
    }

    /// パラメータを追加する
    pub(crate) fn with_param(mut self, name: &str, value: &str) -> Self {
        self.params.insert(name.to_string(), value.to_string());
        self
    }

    /// パスを設定する
    pub(crate) fn with_path(mut self, path: &str) -> Self {
        self.path = path.to_string();
        self
    }

    /// ホスト名を設定する
    pub(crate) fn with_host(mut self, host: &str) -> Self {
        self.host = Some(host.to_string());
        self
    }

    /// ヘッダーを追加する
    pub(crate) fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }

    /// 認証済みユーザーを設定する
    pub(crate) fn with_principal(mut self, principal: FakePrincipal) -> Self {
        self.principal = Some(principal);
        self
    }
}

impl RequestContext for FakeRequest {
    fn param(&self, name: &str) -> Option<String> {
        self.params.get(name).cloned()
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn host(&self) -> Option<String> {
        self.host.clone()
    }

    fn header(&self, name: &str) -> Option<String> {
        self.headers.get(name).cloned()
    }

    fn session(&self) -> Option<&dyn SessionStore> {
        Some(&self.session)
    }

    fn cookies(&self) -> Option<&dyn CookieStore> {
        Some(&self.cookies)
    }

    fn principal(&self) -> Option<&dyn Principal> {
        self.principal.as_ref().map(|p| p as &dyn Principal)
    }

    fn remote_addr(&self) -> Option<String> {
        self.remote_addr.clone()
    }
}
