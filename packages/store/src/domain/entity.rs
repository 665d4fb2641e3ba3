//! エンティティ
//!
//! `Document` はストアに保存される 1 件のドキュメントです。
//! 書き込みは 1 リクエスト単位でアトミックに適用され、そのたびに `version` が進みます。

use serde_json::{Map, Value};

use super::value_object::{DocumentId, FieldPath, FieldValue, FieldWrite, Timestamp};

/// ドキュメント
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    /// トップレベルのフィールド
    pub fields: Map<String, Value>,
    /// 書き込みごとに 1 ずつ増えるバージョン（作成時は 1）
    pub version: u64,
    /// 最後に書き込まれた時刻
    pub update_time: Timestamp,
}

impl Document {
    /// 新しいドキュメントを作成
    pub fn create(id: DocumentId, writes: &[FieldWrite], now: Timestamp) -> Self {
        let mut fields = Map::new();
        apply_writes(&mut fields, writes, now);
        Self {
            id,
            fields,
            version: 1,
            update_time: now,
        }
    }

    /// 全フィールドを置き換える（作成時の上書き）
    pub fn overwrite(&mut self, writes: &[FieldWrite], now: Timestamp) {
        let mut fields = Map::new();
        apply_writes(&mut fields, writes, now);
        self.fields = fields;
        self.touch(now);
    }

    /// 指定したフィールドのみを更新する
    ///
    /// 書き込まれないフィールドはそのまま残るため、異なるフィールドへの
    /// 同時更新が互いを消すことはありません（フィールド単位の last-writer-wins）。
    pub fn apply(&mut self, writes: &[FieldWrite], now: Timestamp) {
        apply_writes(&mut self.fields, writes, now);
        self.touch(now);
    }

    /// パスが指す値を取得
    pub fn get(&self, path: &FieldPath) -> Option<&Value> {
        let (first, rest) = path.segments().split_first()?;
        rest.iter().try_fold(self.fields.get(first)?, |value, segment| {
            value.as_object()?.get(segment)
        })
    }

    fn touch(&mut self, now: Timestamp) {
        self.version += 1;
        self.update_time = now;
    }
}

/// ある時点のドキュメントの状態（存在しない場合も含む）
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSnapshot {
    pub id: DocumentId,
    pub document: Option<Document>,
}

impl DocumentSnapshot {
    pub fn exists(document: Document) -> Self {
        Self {
            id: document.id.clone(),
            document: Some(document),
        }
    }

    pub fn missing(id: DocumentId) -> Self {
        Self { id, document: None }
    }

    /// スナップショットのバージョン（存在しない場合は 0）
    pub fn version(&self) -> u64 {
        self.document.as_ref().map_or(0, |d| d.version)
    }
}

fn apply_writes(fields: &mut Map<String, Value>, writes: &[FieldWrite], now: Timestamp) {
    for write in writes {
        let value = match &write.value {
            FieldValue::Value(value) => value.clone(),
            FieldValue::ServerTimestamp => Value::from(now.value()),
        };
        set_nested(fields, write.path.segments(), value);
    }
}

/// Intermediate segments that are missing or hold a non-object are replaced
/// with an empty object.
fn set_nested(map: &mut Map<String, Value>, segments: &[String], value: Value) {
    match segments {
        [] => {}
        [last] => {
            map.insert(last.clone(), value);
        }
        [head, rest @ ..] => {
            let child = map.entry(head.clone()).or_insert(Value::Null);
            if !child.is_object() {
                *child = Value::Object(Map::new());
            }
            if let Value::Object(child_map) = child {
                set_nested(child_map, rest, value);
            }
        }
    }
}
