//! Batch dispatch — the one-pass loop over the contact list.
//!
//! Strictly sequential: render, take a slot, hand off to the channel,
//! log the outcome, pause, move on. A failing record is logged and
//! skipped; its slot stays booked so the spacing of later sends never
//! tightens.

use std::time::Duration;

use cobranca_core::error::CobrancaError;
use cobranca_core::records::ContactRecord;
use cobranca_core::template::MessageTemplate;
use cobranca_core::traits::ReminderSender;

use crate::slots::{SendSlot, SlotCursor};

/// Knobs for one batch run.
#[derive(Debug, Clone)]
pub struct DispatchOptions {
    /// Prefix for every phone number, e.g. "+55".
    pub country_code: String,
    /// Pause between records, in seconds.
    pub interval_secs: u64,
    /// Channel preparation time per send, in seconds.
    pub wait_secs: u64,
}

/// What happened to one record.
#[derive(Debug)]
pub enum SendOutcome {
    Sent {
        nome: String,
        telefone: String,
        slot: SendSlot,
    },
    Failed {
        nome: String,
        telefone: String,
        error: CobrancaError,
    },
}

/// Outcome log for a whole run.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<SendOutcome>,
}

impl BatchReport {
    pub fn sent(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, SendOutcome::Sent { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.sent()
    }
}

/// Run the batch over `records` in source order. Never aborts early:
/// every record gets its attempt, every attempt gets an outcome.
pub async fn run_batch(
    sender: &dyn ReminderSender,
    records: &[ContactRecord],
    template: &MessageTemplate,
    mut cursor: SlotCursor,
    opts: &DispatchOptions,
) -> BatchReport {
    let mut report = BatchReport::default();

    for (i, record) in records.iter().enumerate() {
        let (slot, next) = cursor.next();
        cursor = next;

        if slot.past_midnight() {
            tracing::warn!("Slot {} is past midnight; delivery behavior is undefined", slot);
        }

        match send_one(sender, record, template, slot, opts).await {
            Ok(()) => {
                println!("Mensagem enviada para {} ({})", record.nome, record.telefone);
                tracing::info!("Sent to {} at slot {}", record.nome, slot);
                report.outcomes.push(SendOutcome::Sent {
                    nome: record.nome.clone(),
                    telefone: record.telefone.clone(),
                    slot,
                });
            }
            Err(e) => {
                println!("Erro ao enviar para {}: {}", record.nome, e);
                tracing::warn!("Failed for {} ({}): {}", record.nome, record.telefone, e);
                report.outcomes.push(SendOutcome::Failed {
                    nome: record.nome.clone(),
                    telefone: record.telefone.clone(),
                    error: e,
                });
            }
        }

        // Fixed pause between records, skipped after the last one.
        if i + 1 < records.len() && opts.interval_secs > 0 {
            tokio::time::sleep(Duration::from_secs(opts.interval_secs)).await;
        }
    }

    report
}

async fn send_one(
    sender: &dyn ReminderSender,
    record: &ContactRecord,
    template: &MessageTemplate,
    slot: SendSlot,
    opts: &DispatchOptions,
) -> cobranca_core::Result<()> {
    record.validate()?;
    let message = template.render(record)?;
    let to = format!("{}{}", opts.country_code, record.telefone);
    sender
        .send_at(&to, &message, slot.hour, slot.minute, opts.wait_secs)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Channel stub recording every send; numbers listed in
    /// `reject` fail with a channel error.
    #[derive(Default)]
    struct StubSender {
        sent: Mutex<Vec<(String, String, u32, u32)>>,
        reject: Vec<String>,
    }

    #[async_trait]
    impl ReminderSender for StubSender {
        fn name(&self) -> &str { "stub" }

        async fn connect(&mut self) -> cobranca_core::Result<()> {
            Ok(())
        }

        async fn send_at(
            &self,
            to: &str,
            message: &str,
            hour: u32,
            minute: u32,
            _wait_secs: u64,
        ) -> cobranca_core::Result<()> {
            if self.reject.iter().any(|r| to.ends_with(r.as_str())) {
                return Err(CobrancaError::Channel("invalid number".into()));
            }
            self.sent
                .lock()
                .unwrap()
                .push((to.to_string(), message.to_string(), hour, minute));
            Ok(())
        }
    }

    fn record(nome: &str, telefone: &str) -> ContactRecord {
        ContactRecord {
            nome: nome.into(),
            telefone: telefone.into(),
            valor: 100.0,
            data_vencimento: "10/08".into(),
        }
    }

    fn opts() -> DispatchOptions {
        DispatchOptions {
            country_code: "+55".into(),
            interval_secs: 0,
            wait_secs: 0,
        }
    }

    #[tokio::test]
    async fn test_all_records_sent_in_order() {
        let sender = StubSender::default();
        let records = vec![record("Ana", "111"), record("Bruno", "222")];
        let template = MessageTemplate::new("Oi {nome}");
        let cursor = SlotCursor::from_time(14, 0, 2, 2);

        let report = run_batch(&sender, &records, &template, cursor, &opts()).await;

        assert_eq!(report.sent(), 2);
        assert_eq!(report.failed(), 0);
        let sent = sender.sent.lock().unwrap();
        assert_eq!(sent[0], ("+55111".into(), "Oi Ana".into(), 14, 2));
        assert_eq!(sent[1], ("+55222".into(), "Oi Bruno".into(), 14, 4));
    }

    #[tokio::test]
    async fn test_failure_does_not_stop_the_batch() {
        let sender = StubSender {
            reject: vec!["222".into()],
            ..Default::default()
        };
        let records = vec![
            record("Ana", "111"),
            record("Bruno", "222"),
            record("Carla", "333"),
        ];
        let template = MessageTemplate::new("Oi {nome}");
        let cursor = SlotCursor::from_time(14, 0, 2, 2);

        let report = run_batch(&sender, &records, &template, cursor, &opts()).await;

        assert_eq!(report.outcomes.len(), 3);
        assert_eq!(report.sent(), 2);
        assert_eq!(report.failed(), 1);
        assert!(matches!(
            report.outcomes[1],
            SendOutcome::Failed { ref nome, .. } if nome == "Bruno"
        ));
    }

    #[tokio::test]
    async fn test_failed_record_still_burns_its_slot() {
        let sender = StubSender {
            reject: vec!["222".into()],
            ..Default::default()
        };
        let records = vec![record("Ana", "111"), record("Bruno", "222"), record("Carla", "333")];
        let template = MessageTemplate::new("Oi {nome}");
        let cursor = SlotCursor::from_time(14, 0, 2, 2);

        run_batch(&sender, &records, &template, cursor, &opts()).await;

        // Ana got 14:02; Bruno's 14:04 is wasted; Carla lands on 14:06.
        let sent = sender.sent.lock().unwrap();
        assert_eq!(sent.len(), 2);
        assert_eq!((sent[1].2, sent[1].3), (14, 6));
    }

    #[tokio::test]
    async fn test_bad_template_is_per_record_failure() {
        let sender = StubSender::default();
        let records = vec![record("Ana", "111")];
        let template = MessageTemplate::new("Oi {cliente}");
        let cursor = SlotCursor::from_time(14, 0, 2, 2);

        let report = run_batch(&sender, &records, &template, cursor, &opts()).await;

        assert_eq!(report.failed(), 1);
        assert!(sender.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_phone_is_per_record_failure() {
        let sender = StubSender::default();
        let records = vec![record("Ana", ""), record("Bruno", "222")];
        let template = MessageTemplate::new("Oi {nome}");
        let cursor = SlotCursor::from_time(14, 0, 2, 2);

        let report = run_batch(&sender, &records, &template, cursor, &opts()).await;

        assert_eq!(report.failed(), 1);
        assert_eq!(report.sent(), 1);
    }

    #[tokio::test]
    async fn test_empty_batch_yields_empty_report() {
        let sender = StubSender::default();
        let template = MessageTemplate::new("Oi {nome}");
        let cursor = SlotCursor::from_time(14, 0, 2, 2);

        let report = run_batch(&sender, &[], &template, cursor, &opts()).await;

        assert!(report.outcomes.is_empty());
    }
}
