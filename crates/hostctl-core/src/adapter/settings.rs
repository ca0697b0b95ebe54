use hostctl_api::{PostgresConfigResponse, UpdatePostgresConfigBody};
use hostctl_config::{PostgresSettings, SessionReplicationRole};

use super::{RemoteAdapter, merge_field, to_local_count, to_remote_i64};

impl RemoteAdapter for PostgresSettings {
    type Remote = PostgresConfigResponse;
    type Body = UpdatePostgresConfigBody;

    fn is_managed(&self) -> bool {
        true
    }

    fn from_remote(&mut self, remote: &PostgresConfigResponse) {
        let r = remote.clone();
        merge_field(&mut self.effective_cache_size, r.effective_cache_size);
        merge_field(&mut self.logical_decoding_work_mem, r.logical_decoding_work_mem);
        merge_field(&mut self.maintenance_work_mem, r.maintenance_work_mem);
        merge_field(&mut self.max_connections, to_local_count(r.max_connections));
        merge_field(
            &mut self.max_locks_per_transaction,
            to_local_count(r.max_locks_per_transaction),
        );
        merge_field(
            &mut self.max_parallel_maintenance_workers,
            to_local_count(r.max_parallel_maintenance_workers),
        );
        merge_field(&mut self.max_parallel_workers, to_local_count(r.max_parallel_workers));
        merge_field(
            &mut self.max_parallel_workers_per_gather,
            to_local_count(r.max_parallel_workers_per_gather),
        );
        merge_field(&mut self.max_replication_slots, to_local_count(r.max_replication_slots));
        merge_field(&mut self.max_slot_wal_keep_size, r.max_slot_wal_keep_size);
        merge_field(&mut self.max_standby_archive_delay, r.max_standby_archive_delay);
        merge_field(&mut self.max_standby_streaming_delay, r.max_standby_streaming_delay);
        merge_field(&mut self.max_wal_size, r.max_wal_size);
        merge_field(&mut self.max_wal_senders, to_local_count(r.max_wal_senders));
        merge_field(&mut self.max_worker_processes, to_local_count(r.max_worker_processes));
        // An unrecognised remote role shows up as drift
        merge_field(
            &mut self.session_replication_role,
            r.session_replication_role
                .and_then(|role| role.parse::<SessionReplicationRole>().ok()),
        );
        merge_field(&mut self.shared_buffers, r.shared_buffers);
        merge_field(&mut self.statement_timeout, r.statement_timeout);
        merge_field(&mut self.track_activity_query_size, r.track_activity_query_size);
        merge_field(&mut self.track_commit_timestamp, r.track_commit_timestamp);
        merge_field(&mut self.wal_keep_size, r.wal_keep_size);
        merge_field(&mut self.wal_sender_timeout, r.wal_sender_timeout);
        merge_field(&mut self.work_mem, r.work_mem);
    }

    fn to_remote_body(&self) -> UpdatePostgresConfigBody {
        UpdatePostgresConfigBody {
            effective_cache_size: self.effective_cache_size.clone(),
            logical_decoding_work_mem: self.logical_decoding_work_mem.clone(),
            maintenance_work_mem: self.maintenance_work_mem.clone(),
            max_connections: to_remote_i64(self.max_connections),
            max_locks_per_transaction: to_remote_i64(self.max_locks_per_transaction),
            max_parallel_maintenance_workers: to_remote_i64(self.max_parallel_maintenance_workers),
            max_parallel_workers: to_remote_i64(self.max_parallel_workers),
            max_parallel_workers_per_gather: to_remote_i64(self.max_parallel_workers_per_gather),
            max_replication_slots: to_remote_i64(self.max_replication_slots),
            max_slot_wal_keep_size: self.max_slot_wal_keep_size.clone(),
            max_standby_archive_delay: self.max_standby_archive_delay.clone(),
            max_standby_streaming_delay: self.max_standby_streaming_delay.clone(),
            max_wal_size: self.max_wal_size.clone(),
            max_wal_senders: to_remote_i64(self.max_wal_senders),
            max_worker_processes: to_remote_i64(self.max_worker_processes),
            session_replication_role: self.session_replication_role.map(String::from),
            shared_buffers: self.shared_buffers.clone(),
            statement_timeout: self.statement_timeout.clone(),
            track_activity_query_size: self.track_activity_query_size.clone(),
            track_commit_timestamp: self.track_commit_timestamp,
            wal_keep_size: self.wal_keep_size.clone(),
            wal_sender_timeout: self.wal_sender_timeout.clone(),
            work_mem: self.work_mem.clone(),
            restart_database: None,
        }
    }
}
