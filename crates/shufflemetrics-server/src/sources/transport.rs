//! Data-transport (netty-style) server catalog.

use super::call::{CallFamilyNames, CallKind};

/// Request types served over the data transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportRequest {
    SendShuffleData,
    GetLocalShuffleData,
    GetLocalShuffleIndex,
    GetMemoryShuffleData,
    RequireBuffer,
    GetShuffleResult,
    GetShuffleResultForMultiPart,
    ReportShuffleResult,
    FinishShuffle,
    CommitShuffleTask,
    RegisterShuffle,
    UnregisterShuffle,
    UnregisterShuffleByAppId,
    AppHeartbeat,
    GetLocalShuffleDataV2,
    GetLocalShuffleIndexV2,
}

impl CallKind for TransportRequest {
    const KINDS: &'static [Self] = &[
        TransportRequest::SendShuffleData,
        TransportRequest::GetLocalShuffleData,
        TransportRequest::GetLocalShuffleIndex,
        TransportRequest::GetMemoryShuffleData,
        TransportRequest::RequireBuffer,
        TransportRequest::GetShuffleResult,
        TransportRequest::GetShuffleResultForMultiPart,
        TransportRequest::ReportShuffleResult,
        TransportRequest::FinishShuffle,
        TransportRequest::CommitShuffleTask,
        TransportRequest::RegisterShuffle,
        TransportRequest::UnregisterShuffle,
        TransportRequest::UnregisterShuffleByAppId,
        TransportRequest::AppHeartbeat,
        TransportRequest::GetLocalShuffleDataV2,
        TransportRequest::GetLocalShuffleIndexV2,
    ];

    const NAMES: CallFamilyNames = CallFamilyNames {
        executor_active_threads: "netty_server_executor_active_threads",
        executor_queue_size: "netty_server_executor_blocking_queue_size",
        connection_number: "netty_server_connection_number",
        open: "netty_open",
        total: "netty_total",
        failed: "netty_failed",
        in_flight: "netty_in_flight",
        process_time_ms: "netty_process_time_ms",
        transport_time_ms: None,
    };

    fn as_label(self) -> &'static str {
        match self {
            TransportRequest::SendShuffleData => "send_shuffle_data",
            TransportRequest::GetLocalShuffleData => "get_local_shuffle_data",
            TransportRequest::GetLocalShuffleIndex => "get_local_shuffle_index",
            TransportRequest::GetMemoryShuffleData => "get_memory_shuffle_data",
            TransportRequest::RequireBuffer => "require_buffer",
            TransportRequest::GetShuffleResult => "get_shuffle_result",
            TransportRequest::GetShuffleResultForMultiPart => "get_shuffle_result_for_multipart",
            TransportRequest::ReportShuffleResult => "report_shuffle_result",
            TransportRequest::FinishShuffle => "finish_shuffle",
            TransportRequest::CommitShuffleTask => "commit_shuffle_task",
            TransportRequest::RegisterShuffle => "register_shuffle",
            TransportRequest::UnregisterShuffle => "unregister_shuffle",
            TransportRequest::UnregisterShuffleByAppId => "unregister_shuffle_by_app_id",
            TransportRequest::AppHeartbeat => "app_heartbeat",
            TransportRequest::GetLocalShuffleDataV2 => "get_local_shuffle_data_v2",
            TransportRequest::GetLocalShuffleIndexV2 => "get_local_shuffle_index_v2",
        }
    }
}
