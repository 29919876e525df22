//! gRPC server catalog.

use super::call::{CallFamilyNames, CallKind};

/// Shuffle-server RPC methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RpcMethod {
    RegisterShuffle,
    UnregisterShuffle,
    UnregisterShuffleByAppId,
    SendShuffleData,
    CommitShuffleTask,
    ReportShuffleResult,
    GetShuffleResult,
    GetShuffleResultForMultiPart,
    FinishShuffle,
    RequireBuffer,
    AppHeartbeat,
    GetLocalShuffleIndex,
    GetLocalShuffleData,
    GetMemoryShuffleData,
    StartSortMerge,
    GetSortedShuffleData,
}

impl CallKind for RpcMethod {
    const KINDS: &'static [Self] = &[
        RpcMethod::RegisterShuffle,
        RpcMethod::UnregisterShuffle,
        RpcMethod::UnregisterShuffleByAppId,
        RpcMethod::SendShuffleData,
        RpcMethod::CommitShuffleTask,
        RpcMethod::ReportShuffleResult,
        RpcMethod::GetShuffleResult,
        RpcMethod::GetShuffleResultForMultiPart,
        RpcMethod::FinishShuffle,
        RpcMethod::RequireBuffer,
        RpcMethod::AppHeartbeat,
        RpcMethod::GetLocalShuffleIndex,
        RpcMethod::GetLocalShuffleData,
        RpcMethod::GetMemoryShuffleData,
        RpcMethod::StartSortMerge,
        RpcMethod::GetSortedShuffleData,
    ];

    const NAMES: CallFamilyNames = CallFamilyNames {
        executor_active_threads: "grpc_server_executor_active_threads",
        executor_queue_size: "grpc_server_executor_blocking_queue_size",
        connection_number: "grpc_server_connection_number",
        open: "grpc_open",
        total: "grpc_total",
        failed: "grpc_failed",
        in_flight: "grpc_in_flight",
        process_time_ms: "grpc_process_time_ms",
        transport_time_ms: Some("grpc_transport_time_ms"),
    };

    fn as_label(self) -> &'static str {
        match self {
            RpcMethod::RegisterShuffle => "registerShuffle",
            RpcMethod::UnregisterShuffle => "unregisterShuffle",
            RpcMethod::UnregisterShuffleByAppId => "unregisterShuffleByAppId",
            RpcMethod::SendShuffleData => "sendShuffleData",
            RpcMethod::CommitShuffleTask => "commitShuffleTask",
            RpcMethod::ReportShuffleResult => "reportShuffleResult",
            RpcMethod::GetShuffleResult => "getShuffleResult",
            RpcMethod::GetShuffleResultForMultiPart => "getShuffleResultForMultiPart",
            RpcMethod::FinishShuffle => "finishShuffle",
            RpcMethod::RequireBuffer => "requireBuffer",
            RpcMethod::AppHeartbeat => "appHeartbeat",
            RpcMethod::GetLocalShuffleIndex => "getLocalShuffleIndex",
            RpcMethod::GetLocalShuffleData => "getLocalShuffleData",
            RpcMethod::GetMemoryShuffleData => "getMemoryShuffleData",
            RpcMethod::StartSortMerge => "startSortMerge",
            RpcMethod::GetSortedShuffleData => "getSortedShuffleData",
        }
    }
}
